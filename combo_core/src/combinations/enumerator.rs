//! Scenario enumeration
//!
//! Splits the caller's loads into permanent, non-wind variable, wind and
//! exceptional groups, then walks each rule's enumeration mode to produce
//! scenarios. Scenarios reference loads by index into the caller's slice, so
//! one load can appear with different roles in different scenarios without
//! being copied.
//!
//! ## Wind
//!
//! Wind loads describe alternative directions of the same action and are
//! never summed together. Each wind load is a principal candidate of its own;
//! under rules that admit ψ₀-weighted secondary wind, a non-wind principal
//! is accompanied by the single governing wind load.

use super::rules::{CombinationRule, Enumeration};
use crate::errors::ComboResult;
use crate::factors::{FactorResolver, Role};
use crate::loads::{Load, LoadClass};

/// One resolved term of a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioTerm {
    /// Index into the caller's load slice
    pub load: usize,
    pub role: Role,
    pub factor: f64,
}

/// A set of (load, role, factor) terms for one rule
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub rule: CombinationRule,
    pub terms: Vec<ScenarioTerm>,
}

impl Scenario {
    pub fn principal(&self) -> Option<usize> {
        self.terms.iter().find(|t| t.role.is_principal()).map(|t| t.load)
    }
}

/// Load indices grouped by class, each group in caller order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub permanent: Vec<usize>,
    pub variable: Vec<usize>,
    pub wind: Vec<usize>,
    pub exceptional: Vec<usize>,
    /// Non-wind and wind variable loads together, in caller order
    pub candidates: Vec<usize>,
}

impl Partition {
    pub fn new(loads: &[Load], resolver: &FactorResolver) -> ComboResult<Self> {
        let mut partition = Partition::default();
        for (index, load) in loads.iter().enumerate() {
            match load.class {
                LoadClass::Permanent => partition.permanent.push(index),
                LoadClass::Exceptional => partition.exceptional.push(index),
                LoadClass::Variable => {
                    if resolver.table().is_wind(load.category)? {
                        partition.wind.push(index);
                    } else {
                        partition.variable.push(index);
                    }
                    partition.candidates.push(index);
                }
            }
        }
        Ok(partition)
    }

    fn is_wind(&self, index: usize) -> bool {
        self.wind.contains(&index)
    }
}

/// Accumulates terms, dropping any whose factor resolves to zero
struct ScenarioBuilder<'a> {
    loads: &'a [Load],
    resolver: &'a FactorResolver<'a>,
    rule: CombinationRule,
    terms: Vec<ScenarioTerm>,
}

impl<'a> ScenarioBuilder<'a> {
    fn new(loads: &'a [Load], resolver: &'a FactorResolver<'a>, rule: CombinationRule) -> Self {
        ScenarioBuilder {
            loads,
            resolver,
            rule,
            terms: Vec::new(),
        }
    }

    fn with_permanents(mut self, partition: &Partition) -> ComboResult<Self> {
        for &index in &partition.permanent {
            self.push(index, Role::Permanent)?;
        }
        Ok(self)
    }

    /// Returns whether the term was kept
    fn push(&mut self, index: usize, role: Role) -> ComboResult<bool> {
        let factor = self.resolver.resolve(&self.loads[index], self.rule, role.is_principal())?;
        if factor == 0.0 {
            return Ok(false);
        }
        self.terms.push(ScenarioTerm { load: index, role, factor });
        Ok(true)
    }

    fn finish(self, out: &mut Vec<Scenario>) {
        if self.terms.is_empty() {
            tracing::debug!(rule = %self.rule, "skipping scenario with no terms");
            return;
        }
        out.push(Scenario {
            rule: self.rule,
            terms: self.terms,
        });
    }
}

/// Enumerate every scenario `rule` requires for `loads`
///
/// Output order follows the caller's load order: principal candidates,
/// isolated loads and exceptional loads are visited in the sequence they
/// were supplied.
pub fn enumerate(loads: &[Load], rule: CombinationRule, resolver: &FactorResolver) -> ComboResult<Vec<Scenario>> {
    let partition = Partition::new(loads, resolver)?;
    let mut scenarios = Vec::new();

    let candidates: Vec<usize> = partition
        .candidates
        .iter()
        .copied()
        .filter(|&i| !(rule.excludes_wind() && partition.is_wind(i)))
        .collect();

    match rule.enumeration() {
        Enumeration::Principal => {
            for &principal in &candidates {
                let mut builder = ScenarioBuilder::new(loads, resolver, rule).with_permanents(&partition)?;
                if !builder.push(principal, Role::Principal)? {
                    tracing::debug!(rule = %rule, load = %loads[principal].id, "principal factor is zero, skipped");
                    continue;
                }
                for &secondary in partition.variable.iter().filter(|&&i| i != principal) {
                    builder.push(secondary, Role::Secondary)?;
                }
                if rule.admits_secondary_wind() && !partition.is_wind(principal) {
                    if let Some(wind) = governing_wind(loads, &partition.wind, rule, resolver)? {
                        builder.push(wind, Role::Secondary)?;
                    }
                }
                builder.finish(&mut scenarios);
            }
        }
        Enumeration::Isolated => {
            for &index in &candidates {
                let mut builder = ScenarioBuilder::new(loads, resolver, rule).with_permanents(&partition)?;
                if !builder.push(index, Role::Principal)? {
                    tracing::debug!(rule = %rule, load = %loads[index].id, "isolated factor is zero, skipped");
                    continue;
                }
                builder.finish(&mut scenarios);
            }
        }
        Enumeration::AllAtOnce => {
            let mut builder = ScenarioBuilder::new(loads, resolver, rule).with_permanents(&partition)?;
            for &index in candidates.iter().filter(|&&i| !partition.is_wind(i)) {
                builder.push(index, Role::Secondary)?;
            }
            builder.finish(&mut scenarios);
        }
        Enumeration::PerExceptional => {
            for &index in &partition.exceptional {
                let mut builder = ScenarioBuilder::new(loads, resolver, rule).with_permanents(&partition)?;
                builder.push(index, Role::Exceptional)?;
                builder.finish(&mut scenarios);
            }
        }
    }

    if scenarios.is_empty() && rule.enumeration() != Enumeration::PerExceptional {
        // no variable load took part: permanent-only fallback
        ScenarioBuilder::new(loads, resolver, rule)
            .with_permanents(&partition)?
            .finish(&mut scenarios);
    }

    tracing::debug!(rule = %rule, scenarios = scenarios.len(), "enumerated rule");
    Ok(scenarios)
}

/// Wind load with the largest secondary contribution, earliest on ties
fn governing_wind(
    loads: &[Load],
    wind: &[usize],
    rule: CombinationRule,
    resolver: &FactorResolver,
) -> ComboResult<Option<usize>> {
    let mut best: Option<(usize, f64)> = None;
    for &index in wind {
        let factor = resolver.resolve(&loads[index], rule, false)?;
        if factor == 0.0 {
            continue;
        }
        let contribution = (factor * loads[index].signed_value()).abs();
        match best {
            Some((_, current)) if contribution <= current => {}
            _ => best = Some((index, contribution)),
        }
    }
    Ok(best.map(|(index, _)| index))
}
