//! Load definitions and input validation
//!
//! This module holds the records the caller supplies to the engine.
//!
//! # Overview
//!
//! - [`Load`] - One characteristic action: id, magnitude, sign, class, category
//! - [`LoadClass`] - Permanent / variable / exceptional
//! - [`ActionCategory`] - Selects the partial factor (and the wind flag)
//! - [`UsageClass`] - Selects ψ₀/ψ₁/ψ₂ for variable loads
//!
//! # Example
//!
//! ```
//! use combo_core::loads::{ActionCategory, Load, UsageClass};
//!
//! let loads = vec![
//!     Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
//!     Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::FixedEquipment),
//!     Load::variable("W1", 2.0, ActionCategory::Wind, UsageClass::WindPressure).negative(),
//! ];
//!
//! assert_eq!(loads[2].signed_value(), -2.0);
//! ```

pub mod load_types;

pub use load_types::{ActionCategory, LoadClass, UsageClass};

use std::collections::HashSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{ComboError, ComboResult};
use crate::factors::FactorTable;
use crate::settings::EngineSettings;

/// Direction of a load relative to the member's positive axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub fn multiplier(&self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// A single characteristic load as entered by the user
///
/// The magnitude is stored non-negative; direction lives in `sign`. Loads are
/// immutable once handed to the engine, which only borrows them.
///
/// # JSON Format
/// ```json
/// {
///   "id": "Q1",
///   "value": 3.0,
///   "sign": "Positive",
///   "class": "Variable",
///   "category": "GenericVariable",
///   "usage_class": "Offices"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Identifier, unique within one request (e.g. "CC1")
    pub id: String,

    /// Characteristic magnitude (kN/m²), non-negative
    pub value: f64,

    /// Direction
    #[serde(default)]
    pub sign: Sign,

    /// Declared class; must agree with the category's class
    pub class: LoadClass,

    /// Action category
    pub category: ActionCategory,

    /// Usage class, required for variable loads and ignored otherwise.
    /// `"N/A"` and `null` both read as absent.
    #[serde(default, deserialize_with = "usage_class_or_na")]
    pub usage_class: Option<UsageClass>,
}

impl Load {
    /// Create a positive permanent load
    pub fn permanent(id: impl Into<String>, value: f64, category: ActionCategory) -> Self {
        Load {
            id: id.into(),
            value,
            sign: Sign::Positive,
            class: LoadClass::Permanent,
            category,
            usage_class: None,
        }
    }

    /// Create a positive variable load
    pub fn variable(id: impl Into<String>, value: f64, category: ActionCategory, usage_class: UsageClass) -> Self {
        Load {
            id: id.into(),
            value,
            sign: Sign::Positive,
            class: LoadClass::Variable,
            category,
            usage_class: Some(usage_class),
        }
    }

    /// Create a positive exceptional load
    pub fn exceptional(id: impl Into<String>, value: f64) -> Self {
        Load {
            id: id.into(),
            value,
            sign: Sign::Positive,
            class: LoadClass::Exceptional,
            category: ActionCategory::Exceptional,
            usage_class: None,
        }
    }

    /// Flip the load to act in the negative direction (builder pattern)
    pub fn negative(mut self) -> Self {
        self.sign = Sign::Negative;
        self
    }

    /// Magnitude with its direction applied
    pub fn signed_value(&self) -> f64 {
        self.value * self.sign.multiplier()
    }
}

fn usage_class_or_na<'de, D>(deserializer: D) -> Result<Option<UsageClass>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Class(UsageClass),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Class(usage)) => Ok(Some(usage)),
        Some(Raw::Text(text)) if text.trim().eq_ignore_ascii_case("N/A") => Ok(None),
        Some(Raw::Text(text)) => Err(D::Error::custom(format!("unknown usage class `{text}`"))),
    }
}

/// Validate a load list before generation
///
/// Checks, in order: load count against the configured bounds, magnitudes,
/// id uniqueness, class/category agreement, usage class presence on variable
/// loads, and finally that at least one magnitude is non-zero.
pub fn validate_loads(loads: &[Load], settings: &EngineSettings, table: &FactorTable) -> ComboResult<()> {
    if loads.len() < settings.min_loads {
        return Err(ComboError::TooFewLoads {
            minimum: settings.min_loads,
            actual: loads.len(),
        });
    }
    if loads.len() > settings.max_loads {
        return Err(ComboError::TooManyLoads {
            maximum: settings.max_loads,
            actual: loads.len(),
        });
    }

    let mut seen = HashSet::new();
    for load in loads {
        if load.id.trim().is_empty() {
            return Err(ComboError::invalid_input("id", &load.id, "Load id cannot be empty"));
        }
        if !load.value.is_finite() || load.value < 0.0 {
            return Err(ComboError::invalid_input(
                format!("{}.value", load.id),
                load.value.to_string(),
                "Magnitude must be a finite non-negative number; use sign for direction",
            ));
        }
        if !seen.insert(load.id.as_str()) {
            return Err(ComboError::DuplicateLoadId { id: load.id.clone() });
        }

        let entry = table.category(load.category)?;
        if entry.class != load.class {
            return Err(ComboError::ClassificationMismatch {
                load_id: load.id.clone(),
                declared: load.class.to_string(),
                category: load.category.to_string(),
                expected: entry.class.to_string(),
            });
        }

        match (load.class, load.usage_class) {
            (LoadClass::Variable, None) => {
                return Err(ComboError::MissingUsageClass { load_id: load.id.clone() });
            }
            (LoadClass::Permanent | LoadClass::Exceptional, Some(usage)) => {
                tracing::warn!(load = %load.id, usage = %usage, "usage class ignored for non-variable load");
            }
            _ => {}
        }
    }

    if settings.require_nonzero && loads.iter().all(|l| l.value == 0.0) {
        return Err(ComboError::AllMagnitudesZero);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EngineSettings {
        EngineSettings::default()
    }

    #[test]
    fn test_signed_value() {
        let load = Load::permanent("G1", 4.0, ActionCategory::MetalSelfWeight);
        assert_eq!(load.signed_value(), 4.0);
        assert_eq!(load.negative().signed_value(), -4.0);
    }

    #[test]
    fn test_load_deserialization_defaults() {
        let json = r#"{"id":"G1","value":2.5,"class":"Permanent","category":"MetalSelfWeight"}"#;
        let load: Load = serde_json::from_str(json).unwrap();
        assert_eq!(load.sign, Sign::Positive);
        assert_eq!(load.usage_class, None);
    }

    #[test]
    fn test_usage_class_not_applicable() {
        let json = r#"[
            {"id":"G1","value":5.0,"class":"Permanent","category":"MetalSelfWeight","usage_class":"N/A"},
            {"id":"E1","value":8.0,"class":"Exceptional","category":"Exceptional","usage_class":null},
            {"id":"Q1","value":3.0,"class":"Variable","category":"GenericVariable","usage_class":"Offices"}
        ]"#;
        let loads: Vec<Load> = serde_json::from_str(json).unwrap();

        assert_eq!(loads[0].usage_class, None);
        assert_eq!(loads[1].usage_class, None);
        assert_eq!(loads[2].usage_class, Some(UsageClass::Offices));
        assert!(validate_loads(&loads, &settings(), FactorTable::builtin()).is_ok());
    }

    #[test]
    fn test_unknown_usage_class_rejected() {
        let json = r#"{"id":"Q1","value":3.0,"class":"Variable","category":"GenericVariable","usage_class":"Stadiums"}"#;
        let err = serde_json::from_str::<Load>(json).unwrap_err();
        assert!(err.to_string().contains("Stadiums"));
    }

    #[test]
    fn test_valid_loads() {
        let loads = vec![
            Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
            Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::Offices),
        ];
        assert!(validate_loads(&loads, &settings(), FactorTable::builtin()).is_ok());
    }

    #[test]
    fn test_too_few_loads() {
        let err = validate_loads(&[], &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err, ComboError::TooFewLoads { minimum: 1, actual: 0 });
    }

    #[test]
    fn test_too_many_loads() {
        let loads: Vec<Load> = (0..11)
            .map(|i| Load::permanent(format!("G{i}"), 1.0, ActionCategory::MetalSelfWeight))
            .collect();
        let err = validate_loads(&loads, &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err.error_code(), "TOO_MANY_LOADS");
    }

    #[test]
    fn test_negative_magnitude_rejected() {
        let loads = vec![Load::permanent("G1", -1.0, ActionCategory::MetalSelfWeight)];
        let err = validate_loads(&loads, &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let loads = vec![
            Load::permanent("G1", 1.0, ActionCategory::MetalSelfWeight),
            Load::permanent("G1", 2.0, ActionCategory::MetalSelfWeight),
        ];
        let err = validate_loads(&loads, &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err, ComboError::DuplicateLoadId { id: "G1".to_string() });
    }

    #[test]
    fn test_variable_without_usage_class() {
        let mut load = Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::Offices);
        load.usage_class = None;
        let err = validate_loads(&[load], &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err, ComboError::MissingUsageClass { load_id: "Q1".to_string() });
    }

    #[test]
    fn test_class_category_mismatch() {
        let mut load = Load::permanent("W1", 3.0, ActionCategory::Wind);
        load.usage_class = Some(UsageClass::WindPressure);
        let err = validate_loads(&[load], &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err.error_code(), "CLASSIFICATION_MISMATCH");
    }

    #[test]
    fn test_all_zero_rejected() {
        let loads = vec![
            Load::permanent("G1", 0.0, ActionCategory::MetalSelfWeight),
            Load::exceptional("E1", 0.0),
        ];
        let err = validate_loads(&loads, &settings(), FactorTable::builtin()).unwrap_err();
        assert_eq!(err, ComboError::AllMagnitudesZero);
    }

    #[test]
    fn test_all_zero_allowed_when_disabled() {
        let loads = vec![Load::permanent("G1", 0.0, ActionCategory::MetalSelfWeight)];
        let settings = EngineSettings {
            require_nonzero: false,
            ..EngineSettings::default()
        };
        assert!(validate_loads(&loads, &settings, FactorTable::builtin()).is_ok());
    }
}
