//! Factor resolution
//!
//! Given a load, a combination rule and the load's role in the scenario,
//! returns the scalar that multiplies the load's signed value.

use serde::{Deserialize, Serialize};

use super::{FactorTable, Tier};
use crate::combinations::CombinationRule;
use crate::errors::{ComboError, ComboResult};
use crate::loads::{Load, LoadClass};
use crate::settings::PermanentFactorMode;

/// Role of a load inside one generated combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Permanent action, always present
    Permanent,
    /// The single variable action taken at full intensity
    Principal,
    /// A co-occurring variable action, reduced by a ψ factor
    Secondary,
    /// Exceptional action of an accidental combination
    Exceptional,
}

impl Role {
    pub fn is_principal(&self) -> bool {
        matches!(self, Role::Principal)
    }
}

/// Resolves factors against a table and a permanent-factor configuration
///
/// # Example
/// ```
/// use combo_core::combinations::CombinationRule;
/// use combo_core::factors::{FactorResolver, FactorTable};
/// use combo_core::loads::{ActionCategory, Load, UsageClass};
/// use combo_core::settings::PermanentFactorMode;
///
/// let mode = PermanentFactorMode::default();
/// let resolver = FactorResolver::new(FactorTable::builtin(), &mode);
///
/// let q = Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::FixedEquipment);
/// let principal = resolver.resolve(&q, CombinationRule::UlsNormal, true).unwrap();
/// let secondary = resolver.resolve(&q, CombinationRule::UlsNormal, false).unwrap();
/// assert_eq!(principal, 1.5);
/// assert!((secondary - 1.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FactorResolver<'a> {
    table: &'a FactorTable,
    mode: &'a PermanentFactorMode,
}

impl<'a> FactorResolver<'a> {
    pub fn new(table: &'a FactorTable, mode: &'a PermanentFactorMode) -> Self {
        FactorResolver { table, mode }
    }

    pub fn table(&self) -> &'a FactorTable {
        self.table
    }

    /// Factor for `load` under `rule`
    ///
    /// `is_principal` only matters for variable loads. A result of 0.0 means
    /// the load takes no part in the combination.
    pub fn resolve(&self, load: &Load, rule: CombinationRule, is_principal: bool) -> ComboResult<f64> {
        match load.class {
            LoadClass::Permanent => self.permanent_factor(load, rule),
            LoadClass::Variable => self.variable_factor(load, rule, is_principal),
            LoadClass::Exceptional => Ok(exceptional_factor(rule)),
        }
    }

    fn permanent_factor(&self, load: &Load, rule: CombinationRule) -> ComboResult<f64> {
        let Some(tier) = rule.permanent_tier() else {
            // serviceability: characteristic value
            return Ok(1.0);
        };
        match self.mode {
            PermanentFactorMode::ByStructure { structure } => self.table.structure_factor(*structure),
            PermanentFactorMode::ByCategory => self.table.permanent_tier(load.category, tier),
        }
    }

    fn variable_factor(&self, load: &Load, rule: CombinationRule, principal: bool) -> ComboResult<f64> {
        use CombinationRule::*;

        let usage = load
            .usage_class
            .ok_or_else(|| ComboError::MissingUsageClass { load_id: load.id.clone() })?;
        let psi = self.table.psi(usage)?;
        let is_wind = self.table.is_wind(load.category)?;

        let factor = match rule {
            UlsNormal => {
                let gamma_q = self.table.gamma_q(load.category)?;
                if principal { gamma_q } else { gamma_q * psi.psi0 }
            }
            UlsFrequent => {
                let gamma_q = self.table.gamma_q(load.category)?;
                if principal { gamma_q * psi.psi1 } else { gamma_q * psi.psi2 }
            }
            UlsRare => {
                let gamma_q = self.table.gamma_q(load.category)?;
                if principal && !is_wind { gamma_q } else { gamma_q * psi.psi0 }
            }
            UlsAccidental => 0.0,
            SlsNormal => 1.0,
            SlsQuasiPermanent => psi.psi2,
            SlsFrequentReversible => if principal { psi.psi1 } else { psi.psi2 },
            SlsFrequentIrreversible => if principal { 1.0 } else { psi.psi2 },
            SlsRare => if principal { 1.0 } else { psi.psi1 },
        };
        Ok(factor)
    }
}

fn exceptional_factor(rule: CombinationRule) -> f64 {
    match rule {
        CombinationRule::UlsAccidental => 1.0,
        _ => 0.0,
    }
}
