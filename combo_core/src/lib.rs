//! # combo_core - Structural Load Combination Engine
//!
//! `combo_core` generates load combination tables for steel, precast and
//! cast-in-place structures following NBR 8681 / NBR 8800. The caller
//! supplies characteristic loads and the rules to check; the engine returns
//! numbered combinations with their factored terms and design values.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure function from (loads, rules, settings) to a report
//! - **Deterministic**: same input, same ordered output
//! - **JSON-First**: inputs, outputs and errors implement Serialize/Deserialize
//! - **Strict Tables**: an unknown factor key is an error, never a silent zero
//!
//! ## Quick Start
//!
//! ```rust
//! use combo_core::{generate, CombinationRule, EngineSettings};
//! use combo_core::loads::{ActionCategory, Load};
//!
//! let loads = vec![Load::permanent("CC1", 10.0, ActionCategory::MetalSelfWeight)];
//! let report = generate(&loads, &[CombinationRule::UlsNormal], &EngineSettings::default()).unwrap();
//!
//! assert_eq!(report.combinations[0].design_value, 12.5);
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load records, classes, categories and usage classes
//! - [`factors`] - Factor table and factor resolver
//! - [`combinations`] - Rules, enumeration, reduction and the report
//! - [`settings`] - Engine configuration
//! - [`errors`] - Structured error types

pub mod combinations;
pub mod errors;
pub mod factors;
pub mod loads;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use combinations::{generate, generate_with_table, Combination, CombinationReport, CombinationRule};
pub use errors::{ComboError, ComboResult};
pub use factors::{FactorTable, StructureType};
pub use settings::{EngineSettings, PermanentFactorMode};
