//! # Partial and Combination Factors
//!
//! Factor tables for load combinations per NBR 8681 / NBR 8800.
//!
//! ## Overview
//!
//! ```text
//! F_d = Σ γ_g·F_G + γ_q1·F_Q1 + Σ γ_qj·ψ_0j·F_Qj        (ULS normal)
//! F_ser = Σ F_G + ψ_1·F_Q1 + Σ ψ_2j·F_Qj                 (SLS frequent)
//! ```
//!
//! ## Factor Summary
//!
//! | Factor | Description                        | Typical Values |
//! |--------|------------------------------------|----------------|
//! | γ_g    | Permanent actions                  | 1.10 - 1.50    |
//! | γ_q    | Variable actions                   | 1.2 - 1.5      |
//! | ψ₀     | Combination (secondary variable)   | 0.5 - 1.0      |
//! | ψ₁     | Frequent value                     | 0.2 - 0.8      |
//! | ψ₂     | Quasi-permanent value              | 0.0 - 0.5      |
//!
//! The table is immutable. The built-in one is constructed once on first
//! use; alternative tables can be loaded from JSON. Every lookup returns a
//! `ComboResult`: an absent key is a [`ComboError::MissingFactor`], never a
//! silent zero.

pub mod resolver;

pub use resolver::{FactorResolver, Role};

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ComboError, ComboResult};
use crate::loads::{ActionCategory, LoadClass, UsageClass};

/// Built-in NBR 8800 / NBR 8681 table, built on first access
static NBR_8800: Lazy<FactorTable> = Lazy::new(FactorTable::nbr8800);

// ============================================================================
// Table Entries
// ============================================================================

/// Structural material used for the single-factor permanent configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureType {
    /// Steel structure (γ_g = 1.25)
    #[default]
    Metal,
    /// Precast concrete (γ_g = 1.30)
    Precast,
    /// Cast-in-place concrete (γ_g = 1.35)
    CastInPlace,
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Ultimate combination tier used to pick a permanent factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Normal,
    Special,
    Accidental,
}

/// Permanent factors per ultimate combination tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PermanentTiers {
    pub normal: f64,
    pub special: f64,
    pub accidental: f64,
}

impl PermanentTiers {
    pub fn new(normal: f64, special: f64, accidental: f64) -> Self {
        PermanentTiers { normal, special, accidental }
    }

    pub fn get(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Normal => self.normal,
            Tier::Special => self.special,
            Tier::Accidental => self.accidental,
        }
    }
}

/// What the table knows about an action category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Action class implied by the category
    pub class: LoadClass,

    /// Wind actions are combined as mutually exclusive alternatives
    #[serde(default)]
    pub is_wind: bool,

    /// γ_q for variable categories
    #[serde(default)]
    pub gamma_q: Option<f64>,

    /// γ_g tiers for permanent categories
    #[serde(default)]
    pub permanent: Option<PermanentTiers>,
}

impl CategoryEntry {
    fn permanent(normal: f64, special: f64, accidental: f64) -> Self {
        CategoryEntry {
            class: LoadClass::Permanent,
            is_wind: false,
            gamma_q: None,
            permanent: Some(PermanentTiers::new(normal, special, accidental)),
        }
    }

    fn variable(gamma_q: f64, is_wind: bool) -> Self {
        CategoryEntry {
            class: LoadClass::Variable,
            is_wind,
            gamma_q: Some(gamma_q),
            permanent: None,
        }
    }

    fn exceptional() -> Self {
        CategoryEntry {
            class: LoadClass::Exceptional,
            is_wind: false,
            gamma_q: None,
            permanent: None,
        }
    }
}

/// ψ₀ / ψ₁ / ψ₂ reduction factors of a usage class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsiFactors {
    pub psi0: f64,
    pub psi1: f64,
    pub psi2: f64,
}

impl PsiFactors {
    pub fn new(psi0: f64, psi1: f64, psi2: f64) -> Self {
        PsiFactors { psi0, psi1, psi2 }
    }
}

// ============================================================================
// Factor Table
// ============================================================================

/// Immutable factor lookup table
///
/// # Example
/// ```
/// use combo_core::factors::{FactorTable, StructureType};
/// use combo_core::loads::{ActionCategory, UsageClass};
///
/// let table = FactorTable::builtin();
/// assert_eq!(table.structure_factor(StructureType::Metal).unwrap(), 1.25);
/// assert_eq!(table.gamma_q(ActionCategory::Wind).unwrap(), 1.4);
/// assert_eq!(table.psi(UsageClass::WindPressure).unwrap().psi2, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    /// γ_g per structure type (single-factor configuration)
    pub structures: BTreeMap<StructureType, f64>,

    /// Class, wind flag and partial factors per action category
    pub categories: BTreeMap<ActionCategory, CategoryEntry>,

    /// ψ factors per usage class
    pub usage_classes: BTreeMap<UsageClass, PsiFactors>,
}

impl FactorTable {
    /// The shared built-in table
    pub fn builtin() -> &'static FactorTable {
        &NBR_8800
    }

    /// Build the NBR 8800 / NBR 8681 table
    pub fn nbr8800() -> Self {
        use ActionCategory as C;
        use UsageClass as U;

        let structures = BTreeMap::from([
            (StructureType::Metal, 1.25),
            (StructureType::Precast, 1.30),
            (StructureType::CastInPlace, 1.35),
        ]);

        let categories = BTreeMap::from([
            (C::MetalSelfWeight, CategoryEntry::permanent(1.25, 1.15, 1.10)),
            (C::PrecastSelfWeight, CategoryEntry::permanent(1.30, 1.20, 1.15)),
            (C::CastInPlaceSelfWeight, CategoryEntry::permanent(1.35, 1.25, 1.15)),
            (C::IndustrializedInSitu, CategoryEntry::permanent(1.40, 1.30, 1.20)),
            (C::GeneralConstruction, CategoryEntry::permanent(1.50, 1.40, 1.30)),
            (C::Settlement, CategoryEntry::permanent(1.20, 1.20, 0.0)),
            (C::Uncategorized, CategoryEntry::permanent(1.50, 1.40, 1.30)),
            (C::MaximumValue, CategoryEntry::variable(1.5, false)),
            (C::Temperature, CategoryEntry::variable(1.2, false)),
            (C::Wind, CategoryEntry::variable(1.4, true)),
            (C::GenericVariable, CategoryEntry::variable(1.5, false)),
            (C::Exceptional, CategoryEntry::exceptional()),
        ]);

        let usage_classes = BTreeMap::from([
            (U::FixedEquipment, PsiFactors::new(0.7, 0.5, 0.2)),
            (U::Dwellings, PsiFactors::new(0.5, 0.4, 0.3)),
            (U::Hotels, PsiFactors::new(0.5, 0.4, 0.3)),
            (U::Offices, PsiFactors::new(0.5, 0.4, 0.3)),
            (U::SchoolsAndAssembly, PsiFactors::new(0.7, 0.4, 0.3)),
            (U::Garages, PsiFactors::new(0.7, 0.6, 0.5)),
            (U::Shops, PsiFactors::new(0.7, 0.6, 0.5)),
            (U::WindPressure, PsiFactors::new(0.6, 0.2, 0.0)),
            (U::TemperatureVariation, PsiFactors::new(0.6, 0.5, 0.0)),
            (U::PedestrianWalkways, PsiFactors::new(0.6, 0.4, 0.3)),
            (U::CraneRunwayBeams, PsiFactors::new(1.0, 0.8, 0.5)),
            (U::CraneSupportingMembers, PsiFactors::new(0.7, 0.6, 0.4)),
            (U::ExceptionalActions, PsiFactors::new(0.0, 0.0, 0.0)),
        ]);

        FactorTable {
            structures,
            categories,
            usage_classes,
        }
    }

    /// Parse and validate a table from JSON
    pub fn from_json(json: &str) -> ComboResult<Self> {
        let table: FactorTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Read a table from a JSON file
    pub fn load(path: &Path) -> ComboResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ComboError::file_error("read", path.display().to_string(), e.to_string()))?;
        let table = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded factor table");
        Ok(table)
    }

    /// Check internal consistency
    ///
    /// Variable categories need γ_q, permanent categories need tiers, every
    /// factor is non-negative and every ψ lies in [0, 1].
    pub fn validate(&self) -> ComboResult<()> {
        for (structure, factor) in &self.structures {
            check_non_negative(&format!("structures.{structure}"), *factor)?;
        }

        for (category, entry) in &self.categories {
            match entry.class {
                LoadClass::Variable => {
                    let gamma_q = entry
                        .gamma_q
                        .ok_or_else(|| ComboError::missing_factor("categories.gamma_q", category.to_string()))?;
                    check_non_negative(&format!("categories.{category}.gamma_q"), gamma_q)?;
                }
                LoadClass::Permanent => {
                    let tiers = entry
                        .permanent
                        .ok_or_else(|| ComboError::missing_factor("categories.permanent", category.to_string()))?;
                    for value in [tiers.normal, tiers.special, tiers.accidental] {
                        check_non_negative(&format!("categories.{category}.permanent"), value)?;
                    }
                }
                LoadClass::Exceptional => {}
            }
        }

        for (usage, psi) in &self.usage_classes {
            for (name, value) in [("psi0", psi.psi0), ("psi1", psi.psi1), ("psi2", psi.psi2)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ComboError::invalid_input(
                        format!("usage_classes.{usage}.{name}"),
                        value.to_string(),
                        "ψ factors must lie in [0, 1]",
                    ));
                }
            }
        }

        Ok(())
    }

    /// γ_g for a structure type
    pub fn structure_factor(&self, structure: StructureType) -> ComboResult<f64> {
        self.structures
            .get(&structure)
            .copied()
            .ok_or_else(|| ComboError::missing_factor("structures", structure.to_string()))
    }

    /// Category entry (class, wind flag, partial factors)
    pub fn category(&self, category: ActionCategory) -> ComboResult<&CategoryEntry> {
        self.categories
            .get(&category)
            .ok_or_else(|| ComboError::missing_factor("categories", category.to_string()))
    }

    /// Whether a category is a wind action
    pub fn is_wind(&self, category: ActionCategory) -> ComboResult<bool> {
        Ok(self.category(category)?.is_wind)
    }

    /// γ_q of a variable category
    pub fn gamma_q(&self, category: ActionCategory) -> ComboResult<f64> {
        self.category(category)?
            .gamma_q
            .ok_or_else(|| ComboError::missing_factor("categories.gamma_q", category.to_string()))
    }

    /// γ_g of a permanent category for one ultimate tier
    pub fn permanent_tier(&self, category: ActionCategory, tier: Tier) -> ComboResult<f64> {
        self.category(category)?
            .permanent
            .map(|tiers| tiers.get(tier))
            .ok_or_else(|| ComboError::missing_factor("categories.permanent", category.to_string()))
    }

    /// ψ factors of a usage class
    pub fn psi(&self, usage: UsageClass) -> ComboResult<PsiFactors> {
        self.usage_classes
            .get(&usage)
            .copied()
            .ok_or_else(|| ComboError::missing_factor("usage_classes", usage.to_string()))
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        FactorTable::nbr8800()
    }
}

fn check_non_negative(field: &str, value: f64) -> ComboResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ComboError::invalid_input(field, value.to_string(), "Factors must be non-negative"));
    }
    Ok(())
}
