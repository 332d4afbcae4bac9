//! Combination rules per NBR 8681 / NBR 8800
//!
//! The rule set is closed: nine rules, four ultimate and five
//! serviceability. Each rule declares which load classes it admits, how its
//! scenarios are enumerated, and which verification criterion it serves.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ComboError;
use crate::factors::Tier;

/// Limit state family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitState {
    /// Estado Limite Último
    Ultimate,
    /// Estado Limite de Serviço
    Serviceability,
}

impl LimitState {
    /// Portuguese abbreviation (ELU / ELS)
    pub fn code(&self) -> &'static str {
        match self {
            LimitState::Ultimate => "ELU",
            LimitState::Serviceability => "ELS",
        }
    }
}

/// Verification criterion a combination is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    Resistance,
    VisualComfort,
    ReversibleDamage,
    IrreversibleDamage,
}

impl Criterion {
    /// Label used on calculation sheets
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Resistance => "Resistência",
            Criterion::VisualComfort => "Conforto Visual",
            Criterion::ReversibleDamage => "Danos Reversíveis",
            Criterion::IrreversibleDamage => "Danos Irreversíveis",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a rule turns the load set into scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enumeration {
    /// One scenario per principal candidate, others secondary
    Principal,
    /// One scenario per variable load, no secondaries
    Isolated,
    /// A single scenario with every admitted variable load
    AllAtOnce,
    /// One scenario per exceptional load
    PerExceptional,
}

/// A combination rule
///
/// # Example
/// ```
/// use combo_core::combinations::{CombinationRule, Criterion};
///
/// let rule: CombinationRule = "sls-frequent-reversible".parse().unwrap();
/// assert_eq!(rule, CombinationRule::SlsFrequentReversible);
/// assert_eq!(rule.criterion(), Criterion::ReversibleDamage);
/// assert_eq!(rule.display_name(), "ELS Frequente Reversível");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CombinationRule {
    UlsNormal,
    UlsFrequent,
    UlsRare,
    UlsAccidental,
    SlsNormal,
    SlsQuasiPermanent,
    SlsFrequentReversible,
    SlsFrequentIrreversible,
    SlsRare,
}

impl CombinationRule {
    /// All rules in generation order
    pub const ALL: [CombinationRule; 9] = [
        CombinationRule::UlsNormal,
        CombinationRule::UlsFrequent,
        CombinationRule::UlsRare,
        CombinationRule::UlsAccidental,
        CombinationRule::SlsNormal,
        CombinationRule::SlsQuasiPermanent,
        CombinationRule::SlsFrequentReversible,
        CombinationRule::SlsFrequentIrreversible,
        CombinationRule::SlsRare,
    ];

    /// Short code accepted on the command line (e.g. "ULS-Normal")
    pub fn code(&self) -> &'static str {
        match self {
            CombinationRule::UlsNormal => "ULS-Normal",
            CombinationRule::UlsFrequent => "ULS-Frequent",
            CombinationRule::UlsRare => "ULS-Rare",
            CombinationRule::UlsAccidental => "ULS-Accidental",
            CombinationRule::SlsNormal => "SLS-Normal",
            CombinationRule::SlsQuasiPermanent => "SLS-QuasiPermanent",
            CombinationRule::SlsFrequentReversible => "SLS-Frequent-Reversible",
            CombinationRule::SlsFrequentIrreversible => "SLS-Frequent-Irreversible",
            CombinationRule::SlsRare => "SLS-Rare",
        }
    }

    /// Frequency label without the limit-state prefix
    pub fn frequency(&self) -> &'static str {
        match self {
            CombinationRule::UlsNormal | CombinationRule::SlsNormal => "Normal",
            CombinationRule::UlsFrequent => "Frequente",
            CombinationRule::UlsRare | CombinationRule::SlsRare => "Rara",
            CombinationRule::UlsAccidental => "Excepcional",
            CombinationRule::SlsQuasiPermanent => "Quase-permanente",
            CombinationRule::SlsFrequentReversible => "Frequente Reversível",
            CombinationRule::SlsFrequentIrreversible => "Frequente Irreversível",
        }
    }

    /// Full Portuguese name, e.g. "ELU Normal"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.limit_state().code(), self.frequency())
    }

    pub fn limit_state(&self) -> LimitState {
        match self {
            CombinationRule::UlsNormal
            | CombinationRule::UlsFrequent
            | CombinationRule::UlsRare
            | CombinationRule::UlsAccidental => LimitState::Ultimate,
            _ => LimitState::Serviceability,
        }
    }

    pub fn is_ultimate(&self) -> bool {
        self.limit_state() == LimitState::Ultimate
    }

    pub fn criterion(&self) -> Criterion {
        match self {
            CombinationRule::UlsNormal
            | CombinationRule::UlsFrequent
            | CombinationRule::UlsRare
            | CombinationRule::UlsAccidental => Criterion::Resistance,
            CombinationRule::SlsNormal | CombinationRule::SlsQuasiPermanent => Criterion::VisualComfort,
            CombinationRule::SlsFrequentReversible => Criterion::ReversibleDamage,
            CombinationRule::SlsFrequentIrreversible | CombinationRule::SlsRare => Criterion::IrreversibleDamage,
        }
    }

    pub fn enumeration(&self) -> Enumeration {
        match self {
            CombinationRule::UlsAccidental => Enumeration::PerExceptional,
            CombinationRule::SlsNormal => Enumeration::Isolated,
            CombinationRule::SlsQuasiPermanent => Enumeration::AllAtOnce,
            _ => Enumeration::Principal,
        }
    }

    /// Whether a single ψ₀-weighted wind load may join a non-wind principal
    pub fn admits_secondary_wind(&self) -> bool {
        matches!(self, CombinationRule::UlsNormal | CombinationRule::UlsRare)
    }

    /// Wind has ψ₂ = 0, so it never enters the quasi-permanent combination
    pub fn excludes_wind(&self) -> bool {
        matches!(self, CombinationRule::SlsQuasiPermanent)
    }

    /// Permanent-factor tier, `None` for serviceability rules
    pub fn permanent_tier(&self) -> Option<Tier> {
        match self {
            CombinationRule::UlsNormal | CombinationRule::UlsRare => Some(Tier::Normal),
            CombinationRule::UlsFrequent => Some(Tier::Special),
            CombinationRule::UlsAccidental => Some(Tier::Accidental),
            _ => None,
        }
    }
}

impl std::fmt::Display for CombinationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CombinationRule {
    type Err = ComboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CombinationRule::ALL
            .into_iter()
            .find(|rule| rule.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = CombinationRule::ALL.iter().map(|r| r.code()).collect();
                ComboError::invalid_input("rule", wanted, format!("Unknown rule; expected one of {}", known.join(", ")))
            })
    }
}
