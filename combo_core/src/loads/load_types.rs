//! Load classification per NBR 8681
//!
//! Defines the three action classes, the action categories that select a
//! partial factor, and the usage classes that select ψ₀/ψ₁/ψ₂.

use serde::{Deserialize, Serialize};

/// Action class (NBR 8681 Section 4.2)
///
/// # Example
/// ```
/// use combo_core::loads::LoadClass;
///
/// assert_eq!(LoadClass::Variable.code(), "Q");
/// assert_eq!(LoadClass::Permanent.description(), "Permanente");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadClass {
    /// G - Permanent action (self-weight, fixed equipment, settlement)
    Permanent,
    /// Q - Variable action (occupancy, temperature, wind)
    Variable,
    /// E - Exceptional action (impact, explosion, fire)
    Exceptional,
}

impl LoadClass {
    /// Standard symbol (G, Q, E)
    pub fn code(&self) -> &'static str {
        match self {
            LoadClass::Permanent => "G",
            LoadClass::Variable => "Q",
            LoadClass::Exceptional => "E",
        }
    }

    /// Portuguese name as used on calculation sheets
    pub fn description(&self) -> &'static str {
        match self {
            LoadClass::Permanent => "Permanente",
            LoadClass::Variable => "Variável",
            LoadClass::Exceptional => "Excepcional",
        }
    }
}

impl std::fmt::Display for LoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Action category
///
/// The category decides which partial factor applies to a load and whether
/// it is a wind action. The class and factors themselves live in the
/// [`FactorTable`](crate::factors::FactorTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    /// Self-weight of steel structures
    MetalSelfWeight,
    /// Self-weight of precast structures
    PrecastSelfWeight,
    /// Self-weight of cast-in-place structures
    CastInPlaceSelfWeight,
    /// Industrialized construction elements with in-situ additions
    IndustrializedInSitu,
    /// Construction elements in general and equipment
    GeneralConstruction,
    /// Support settlement
    Settlement,
    /// Actions taken at their maximum values
    MaximumValue,
    /// Temperature effects (no fire)
    Temperature,
    /// Wind
    Wind,
    /// Generic variable actions
    GenericVariable,
    /// Exceptional action
    Exceptional,
    /// No specific category (treated as permanent)
    Uncategorized,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 12] = [
        ActionCategory::MetalSelfWeight,
        ActionCategory::PrecastSelfWeight,
        ActionCategory::CastInPlaceSelfWeight,
        ActionCategory::IndustrializedInSitu,
        ActionCategory::GeneralConstruction,
        ActionCategory::Settlement,
        ActionCategory::MaximumValue,
        ActionCategory::Temperature,
        ActionCategory::Wind,
        ActionCategory::GenericVariable,
        ActionCategory::Exceptional,
        ActionCategory::Uncategorized,
    ];

    /// Portuguese description as listed in the design code tables
    pub fn description(&self) -> &'static str {
        match self {
            ActionCategory::MetalSelfWeight => "Peso próprio de estruturas metálicas",
            ActionCategory::PrecastSelfWeight => "Peso próprio de estruturas pré-fabricadas",
            ActionCategory::CastInPlaceSelfWeight => "Peso próprio de estruturas construídas in situ",
            ActionCategory::IndustrializedInSitu => "Elementos de construção industrializados in situ",
            ActionCategory::GeneralConstruction => "Elementos de construção e equipamento geral",
            ActionCategory::Settlement => "Assentamento",
            ActionCategory::MaximumValue => "Ações de valores máximos",
            ActionCategory::Temperature => "Temperatura (sem fogo)",
            ActionCategory::Wind => "Vento",
            ActionCategory::GenericVariable => "Ações variáveis genéricas",
            ActionCategory::Exceptional => "Excepcional",
            ActionCategory::Uncategorized => "Sem categoria",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Usage class of a variable action (NBR 8800 Table 2)
///
/// Selects the ψ₀ (combination), ψ₁ (frequent) and ψ₂ (quasi-permanent)
/// reduction factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UsageClass {
    /// Areas dominated by fixed weights/equipment
    FixedEquipment,
    /// Dwellings
    Dwellings,
    /// Hotels, dormitories, barracks and prisons
    Hotels,
    /// Offices
    Offices,
    /// Schools and assembly areas
    SchoolsAndAssembly,
    /// Passenger vehicle garages
    Garages,
    /// Shops
    Shops,
    /// Dynamic wind pressure
    WindPressure,
    /// Temperature variations
    TemperatureVariation,
    /// Pedestrian walkways (moving loads)
    PedestrianWalkways,
    /// Crane runway beams
    CraneRunwayBeams,
    /// Columns and members supporting crane runway beams
    CraneSupportingMembers,
    /// Exceptional actions
    ExceptionalActions,
}

impl UsageClass {
    pub const ALL: [UsageClass; 13] = [
        UsageClass::FixedEquipment,
        UsageClass::Dwellings,
        UsageClass::Hotels,
        UsageClass::Offices,
        UsageClass::SchoolsAndAssembly,
        UsageClass::Garages,
        UsageClass::Shops,
        UsageClass::WindPressure,
        UsageClass::TemperatureVariation,
        UsageClass::PedestrianWalkways,
        UsageClass::CraneRunwayBeams,
        UsageClass::CraneSupportingMembers,
        UsageClass::ExceptionalActions,
    ];

    /// Portuguese description as listed in NBR 8800 Table 2
    pub fn description(&self) -> &'static str {
        match self {
            UsageClass::FixedEquipment => "Locais com predominância de pesos/equipamentos fixos",
            UsageClass::Dwellings => "Habitações",
            UsageClass::Hotels => "Hotéis, dormitórios, quartéis e prisões",
            UsageClass::Offices => "Escritórios",
            UsageClass::SchoolsAndAssembly => "Escolas e locais de reunião",
            UsageClass::Garages => "Garagens para veículos de passageiros",
            UsageClass::Shops => "Lojas",
            UsageClass::WindPressure => "Pressão dinâmica do vento",
            UsageClass::TemperatureVariation => "Variações de temperatura",
            UsageClass::PedestrianWalkways => "Passarelas de pedestres",
            UsageClass::CraneRunwayBeams => "Vigas de rolamento de pontes rolantes",
            UsageClass::CraneSupportingMembers => "Pilares que suportam vigas de rolamento",
            UsageClass::ExceptionalActions => "Ações excepcionais",
        }
    }
}

impl std::fmt::Display for UsageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
