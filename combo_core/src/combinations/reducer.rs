//! Scenario reduction
//!
//! Turns a scenario into its design value and a readable term list:
//!
//! ```text
//! Q = Σ factor_i × signed_value_i        rounded to `decimals` places
//! "1.25*G1 + 1.50*Q1 + 0.84*W1"
//! ```

use serde::{Deserialize, Serialize};

use super::enumerator::Scenario;
use crate::factors::Role;
use crate::loads::Load;

/// One factored load inside a generated combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationTerm {
    pub load_id: String,
    pub role: Role,
    pub factor: f64,
    /// Characteristic value with its sign applied
    pub signed_value: f64,
}

impl CombinationTerm {
    pub fn contribution(&self) -> f64 {
        self.factor * self.signed_value
    }

    /// "factor*id", factor printed with two decimals
    pub fn label(&self) -> String {
        format!("{:.2}*{}", self.factor, self.load_id)
    }
}

/// Result of reducing one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub design_value: f64,
    pub terms: Vec<CombinationTerm>,
}

impl Reduction {
    pub fn description(&self) -> String {
        describe(&self.terms)
    }
}

/// Reduce a scenario to its design value
///
/// Term order is the scenario's order (permanent, principal, secondary,
/// exceptional) and is kept as-is.
pub fn reduce(scenario: &Scenario, loads: &[Load], decimals: u32) -> Reduction {
    let terms: Vec<CombinationTerm> = scenario
        .terms
        .iter()
        .map(|term| {
            let load = &loads[term.load];
            CombinationTerm {
                load_id: load.id.clone(),
                role: term.role,
                factor: term.factor,
                signed_value: load.signed_value(),
            }
        })
        .collect();

    let total: f64 = terms.iter().map(CombinationTerm::contribution).sum();

    Reduction {
        design_value: round_to(total, decimals),
        terms,
    }
}

/// Join term labels with " + "
pub fn describe(terms: &[CombinationTerm]) -> String {
    terms.iter().map(CombinationTerm::label).collect::<Vec<_>>().join(" + ")
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // avoid printing "-0.000"
    if rounded == 0.0 { 0.0 } else { rounded }
}
