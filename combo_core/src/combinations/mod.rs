//! NBR 8681 / NBR 8800 Load Combinations
//!
//! Generates the combination table for a set of characteristic loads.
//!
//! ## Pipeline
//!
//! ```text
//! loads + rules ──► validate ──► enumerate (per rule) ──► resolve factors ──► reduce ──► number 1..N
//! ```
//!
//! ## Wind Load Convention
//!
//! Wind is entered as a magnitude with a sign. Several wind loads describe
//! alternative directions and never appear together in one combination.
//! Each one is tried as the principal action; rules that allow ψ₀-weighted
//! secondary wind add the governing wind load to non-wind principals.
//!
//! ## Example
//!
//! ```
//! use combo_core::combinations::{generate, CombinationRule};
//! use combo_core::loads::{ActionCategory, Load, UsageClass};
//! use combo_core::settings::EngineSettings;
//!
//! let loads = vec![
//!     Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
//!     Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::FixedEquipment),
//!     Load::variable("W1", 2.0, ActionCategory::Wind, UsageClass::WindPressure),
//! ];
//!
//! let report = generate(&loads, &[CombinationRule::UlsNormal], &EngineSettings::default()).unwrap();
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.combinations[0].description, "1.25*G1 + 1.50*Q1 + 0.84*W1");
//! assert_eq!(report.combinations[0].design_value, 12.43);
//! ```

pub mod enumerator;
pub mod reducer;
pub mod rules;

pub use enumerator::{enumerate, Partition, Scenario, ScenarioTerm};
pub use reducer::{reduce, round_to, CombinationTerm, Reduction};
pub use rules::{CombinationRule, Criterion, Enumeration, LimitState};

use serde::{Deserialize, Serialize};

use crate::errors::{ComboError, ComboResult};
use crate::factors::{FactorResolver, FactorTable, Role};
use crate::loads::{validate_loads, Load};
use crate::settings::EngineSettings;

/// One row of the combination table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// 1-based position in the report, contiguous
    pub number: usize,

    pub rule: CombinationRule,

    pub criterion: Criterion,

    /// Factored loads in output order
    pub terms: Vec<CombinationTerm>,

    /// e.g. "1.25*G1 + 1.50*Q1 + 0.84*W1"
    pub description: String,

    /// Rounded design value
    pub design_value: f64,
}

impl Combination {
    /// Id of the principal variable load, if any
    pub fn principal(&self) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| t.role == Role::Principal)
            .map(|t| t.load_id.as_str())
    }

    /// Whether the load with this id takes part in the combination
    pub fn includes(&self, load_id: &str) -> bool {
        self.terms.iter().any(|t| t.load_id == load_id)
    }

    /// Factor applied to a load (0.0 when absent)
    pub fn factor(&self, load_id: &str) -> f64 {
        self.terms
            .iter()
            .find(|t| t.load_id == load_id)
            .map(|t| t.factor)
            .unwrap_or(0.0)
    }
}

/// Output of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationReport {
    pub combinations: Vec<Combination>,

    /// Selected rules that produced no combination
    pub empty_rules: Vec<CombinationRule>,
}

impl CombinationReport {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Combinations generated for one rule, in report order
    pub fn for_rule(&self, rule: CombinationRule) -> impl Iterator<Item = &Combination> {
        self.combinations.iter().filter(move |c| c.rule == rule)
    }

    /// Informational message when nothing was generated
    pub fn notice(&self) -> Option<String> {
        if !self.is_empty() {
            return None;
        }
        let rules: Vec<&str> = self.empty_rules.iter().map(|r| r.code()).collect();
        Some(format!(
            "No combinations generated (no applicable loads for: {})",
            rules.join(", ")
        ))
    }

    /// Maximum and minimum design values, `None` for an empty report
    pub fn governing(&self) -> Option<GoverningResults> {
        let first = self.combinations.first()?;
        let mut results = GoverningResults {
            max_value: first.design_value,
            max_number: first.number,
            min_value: first.design_value,
            min_number: first.number,
        };

        for combo in &self.combinations[1..] {
            if combo.design_value > results.max_value {
                results.max_value = combo.design_value;
                results.max_number = combo.number;
            }
            if combo.design_value < results.min_value {
                results.min_value = combo.design_value;
                results.min_number = combo.number;
            }
        }

        Some(results)
    }
}

/// Extremes of a report
///
/// The maximum governs strength checks; the minimum shows net reversal
/// (e.g. wind suction exceeding self-weight).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoverningResults {
    pub max_value: f64,
    /// Number of the combination holding the maximum (first on ties)
    pub max_number: usize,
    pub min_value: f64,
    pub min_number: usize,
}

/// Generate combinations with the factor table named in `settings`
pub fn generate(loads: &[Load], rules: &[CombinationRule], settings: &EngineSettings) -> ComboResult<CombinationReport> {
    let table = settings.factor_table()?;
    generate_with_table(loads, rules, settings, &table)
}

/// Generate combinations against an explicit factor table
///
/// Rules run in [`CombinationRule::ALL`] order whatever the selection order;
/// duplicates in the selection are ignored. Any factor-table miss aborts the
/// whole run.
pub fn generate_with_table(
    loads: &[Load],
    rules: &[CombinationRule],
    settings: &EngineSettings,
    table: &FactorTable,
) -> ComboResult<CombinationReport> {
    settings.validate()?;
    if rules.is_empty() {
        return Err(ComboError::NoRulesSelected);
    }
    validate_loads(loads, settings, table)?;

    let resolver = FactorResolver::new(table, &settings.permanent_factors);
    let mut combinations = Vec::new();
    let mut empty_rules = Vec::new();

    for rule in CombinationRule::ALL.into_iter().filter(|r| rules.contains(r)) {
        let scenarios = enumerate(loads, rule, &resolver)?;
        if scenarios.is_empty() {
            tracing::warn!(rule = %rule, "rule produced no combinations");
            empty_rules.push(rule);
            continue;
        }

        for scenario in &scenarios {
            let reduction = reduce(scenario, loads, settings.decimals);
            tracing::debug!(rule = %rule, value = reduction.design_value, "{}", reduction.description());
            combinations.push(Combination {
                number: combinations.len() + 1,
                rule,
                criterion: rule.criterion(),
                description: reduction.description(),
                design_value: reduction.design_value,
                terms: reduction.terms,
            });
        }
        tracing::info!(rule = %rule, combinations = scenarios.len(), "generated rule");
    }

    Ok(CombinationReport {
        combinations,
        empty_rules,
    })
}
