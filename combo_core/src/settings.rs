//! # Engine Settings
//!
//! Configuration for one generation run: how permanent loads are factored,
//! input-count bounds, rounding, and an optional replacement factor table.
//! Settings serialize to human-readable JSON.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::factors::StructureType;
//! use combo_core::settings::{EngineSettings, PermanentFactorMode};
//!
//! let settings = EngineSettings {
//!     permanent_factors: PermanentFactorMode::ByStructure {
//!         structure: StructureType::Precast,
//!     },
//!     ..EngineSettings::default()
//! };
//! assert!(settings.validate().is_ok());
//!
//! let json = serde_json::to_string_pretty(&settings).unwrap();
//! assert!(json.contains("precast"));
//! ```

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ComboError, ComboResult};
use crate::factors::{FactorTable, StructureType};

/// How the permanent-load factor γ_g is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PermanentFactorMode {
    /// One γ_g for every permanent load, picked by structural material
    ByStructure { structure: StructureType },
    /// γ_g per permanent category with Normal / Special / Accidental tiers
    ByCategory,
}

impl Default for PermanentFactorMode {
    fn default() -> Self {
        PermanentFactorMode::ByStructure {
            structure: StructureType::Metal,
        }
    }
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Permanent-factor configuration
    pub permanent_factors: PermanentFactorMode,

    /// Minimum number of loads accepted
    pub min_loads: usize,

    /// Maximum number of loads accepted
    pub max_loads: usize,

    /// Reject inputs where every magnitude is zero
    pub require_nonzero: bool,

    /// Decimal places kept in the design value
    pub decimals: u32,

    /// JSON factor table to use instead of the built-in one
    pub factor_table: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            permanent_factors: PermanentFactorMode::default(),
            min_loads: 1,
            max_loads: 10,
            require_nonzero: true,
            decimals: 3,
            factor_table: None,
        }
    }
}

impl EngineSettings {
    /// Check the bounds are usable
    pub fn validate(&self) -> ComboResult<()> {
        if self.min_loads == 0 {
            return Err(ComboError::invalid_input("min_loads", "0", "At least one load must be required"));
        }
        if self.min_loads > self.max_loads {
            return Err(ComboError::invalid_input(
                "max_loads",
                self.max_loads.to_string(),
                format!("Must be at least min_loads ({})", self.min_loads),
            ));
        }
        if self.decimals > 9 {
            return Err(ComboError::invalid_input(
                "decimals",
                self.decimals.to_string(),
                "At most 9 decimal places are supported",
            ));
        }
        Ok(())
    }

    /// Load the configured factor table, or the built-in one
    pub fn factor_table(&self) -> ComboResult<Cow<'static, FactorTable>> {
        match &self.factor_table {
            Some(path) => Ok(Cow::Owned(FactorTable::load(path)?)),
            None => Ok(Cow::Borrowed(FactorTable::builtin())),
        }
    }

    /// Read settings from a JSON file
    ///
    /// A relative `factor_table` path is taken relative to the settings
    /// file's directory.
    pub fn load(path: &Path) -> ComboResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ComboError::file_error("read", path.display().to_string(), e.to_string()))?;
        let mut settings: EngineSettings = serde_json::from_str(&json)?;
        settings.validate()?;

        if let (Some(table), Some(dir)) = (settings.factor_table.as_mut(), path.parent()) {
            if table.is_relative() {
                *table = dir.join(&*table);
            }
        }
        Ok(settings)
    }

    /// Write settings as pretty JSON
    ///
    /// Writes to a `.tmp` sibling first and renames it into place so an
    /// interrupted save never leaves a truncated file.
    pub fn save(&self, path: &Path) -> ComboResult<()> {
        let path_str = path.display().to_string();
        let json = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)
            .map_err(|e| ComboError::file_error("create", temp_path.display().to_string(), e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| ComboError::file_error("write", temp_path.display().to_string(), e.to_string()))?;
        file.sync_all()
            .map_err(|e| ComboError::file_error("sync", temp_path.display().to_string(), e.to_string()))?;
        drop(file);

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ComboError::file_error("rename", &path_str, e.to_string())
        })?;

        Ok(())
    }
}
