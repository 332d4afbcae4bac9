//! End-to-end checks of the combination engine through the public API.

use approx::assert_relative_eq;

use combo_core::combinations::CombinationTerm;
use combo_core::factors::Role;
use combo_core::loads::{ActionCategory, Load, UsageClass};
use combo_core::{generate, CombinationRule, ComboError, EngineSettings, PermanentFactorMode, StructureType};

fn settings_for(structure: StructureType) -> EngineSettings {
    EngineSettings {
        permanent_factors: PermanentFactorMode::ByStructure { structure },
        ..EngineSettings::default()
    }
}

fn mixed_loads() -> Vec<Load> {
    vec![
        Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
        Load::permanent("G2", 1.5, ActionCategory::GeneralConstruction),
        Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::Offices),
        Load::variable("T1", 1.0, ActionCategory::Temperature, UsageClass::TemperatureVariation),
        Load::variable("W1", 2.0, ActionCategory::Wind, UsageClass::WindPressure),
        Load::variable("W2", 2.5, ActionCategory::Wind, UsageClass::WindPressure).negative(),
        Load::exceptional("E1", 8.0),
    ]
}

fn uls_rules() -> Vec<CombinationRule> {
    CombinationRule::ALL.into_iter().filter(|r| r.is_ultimate()).collect()
}

#[test]
fn permanent_only_uses_structure_factor() {
    let loads = vec![
        Load::permanent("G1", 5.0, ActionCategory::PrecastSelfWeight),
        Load::permanent("G2", 2.0, ActionCategory::PrecastSelfWeight).negative(),
    ];
    let report = generate(&loads, &uls_rules(), &settings_for(StructureType::Precast)).unwrap();

    // accidental needs an exceptional load
    assert_eq!(report.empty_rules, vec![CombinationRule::UlsAccidental]);
    assert_eq!(report.len(), 3);
    for combo in &report.combinations {
        assert!(combo.terms.iter().all(|t| t.role == Role::Permanent));
        assert!(combo.terms.iter().all(|t| t.factor == 1.30));
        assert_relative_eq!(combo.design_value, 1.3 * 3.0, epsilon = 1e-9);
    }
}

#[test]
fn single_variable_load_is_principal_once_per_rule() {
    let loads = vec![
        Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
        Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::Shops),
    ];
    let report = generate(&loads, &uls_rules(), &EngineSettings::default()).unwrap();

    for rule in [CombinationRule::UlsNormal, CombinationRule::UlsFrequent, CombinationRule::UlsRare] {
        let combos: Vec<_> = report.for_rule(rule).collect();
        assert_eq!(combos.len(), 1, "{rule}");
        assert_eq!(combos[0].principal(), Some("Q1"));
    }

    let normal = report.for_rule(CombinationRule::UlsNormal).next().unwrap();
    assert_relative_eq!(normal.factor("Q1"), 1.5);
    let frequent = report.for_rule(CombinationRule::UlsFrequent).next().unwrap();
    assert_relative_eq!(frequent.factor("Q1"), 1.5 * 0.6, epsilon = 1e-12);
}

#[test]
fn never_two_principals() {
    let report = generate(&mixed_loads(), &CombinationRule::ALL, &EngineSettings::default()).unwrap();
    for combo in &report.combinations {
        let principals = combo.terms.iter().filter(|t| t.role == Role::Principal).count();
        assert!(principals <= 1, "combination {} has {principals} principals", combo.number);
    }
}

#[test]
fn wind_never_in_quasi_permanent() {
    let report = generate(&mixed_loads(), &[CombinationRule::SlsQuasiPermanent], &EngineSettings::default()).unwrap();

    assert_eq!(report.len(), 1);
    let combo = &report.combinations[0];
    assert!(!combo.includes("W1"));
    assert!(!combo.includes("W2"));
    // temperature has ψ₂ = 0 as well
    assert!(!combo.includes("T1"));
    assert_eq!(combo.description, "1.00*G1 + 1.00*G2 + 0.30*Q1");
}

#[test]
fn two_winds_never_share_a_combination() {
    let report = generate(&mixed_loads(), &CombinationRule::ALL, &EngineSettings::default()).unwrap();
    for combo in &report.combinations {
        assert!(!(combo.includes("W1") && combo.includes("W2")), "{}", combo.description);
    }
}

#[test]
fn design_value_is_dot_product() {
    let loads = vec![Load::permanent("CC1", 10.0, ActionCategory::MetalSelfWeight)];
    let report = generate(&loads, &[CombinationRule::UlsNormal], &EngineSettings::default()).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.combinations[0].design_value, 12.5);

    let report = generate(&mixed_loads(), &CombinationRule::ALL, &EngineSettings::default()).unwrap();
    for combo in &report.combinations {
        let dot: f64 = combo.terms.iter().map(CombinationTerm::contribution).sum();
        assert_relative_eq!(combo.design_value, dot, epsilon = 5e-4);
    }
}

#[test]
fn generation_is_deterministic() {
    let loads = mixed_loads();
    let first = generate(&loads, &CombinationRule::ALL, &EngineSettings::default()).unwrap();
    let second = generate(&loads, &CombinationRule::ALL, &EngineSettings::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn numbering_has_no_gaps_when_rules_are_skipped() {
    let loads = vec![
        Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
        Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::Offices),
    ];
    let rules = [
        CombinationRule::UlsNormal,
        CombinationRule::UlsAccidental,
        CombinationRule::SlsRare,
    ];
    let report = generate(&loads, &rules, &EngineSettings::default()).unwrap();

    assert_eq!(report.empty_rules, vec![CombinationRule::UlsAccidental]);
    let numbers: Vec<usize> = report.combinations.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn four_load_wind_scenario() {
    let loads = vec![
        Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
        Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::FixedEquipment),
        Load::variable("Q2", 2.0, ActionCategory::Wind, UsageClass::WindPressure),
    ];
    let report = generate(&loads, &[CombinationRule::UlsNormal], &EngineSettings::default()).unwrap();

    assert_eq!(report.len(), 2);
    for combo in &report.combinations {
        assert_relative_eq!(combo.terms[0].contribution(), 6.25);
    }

    let q1 = &report.combinations[0];
    assert_eq!(q1.principal(), Some("Q1"));
    assert_relative_eq!(q1.factor("Q1"), 1.5);
    assert_relative_eq!(q1.factor("Q2"), 0.84, epsilon = 1e-12);

    let q2 = &report.combinations[1];
    assert_eq!(q2.principal(), Some("Q2"));
    assert_relative_eq!(q2.factor("Q2"), 1.4);
    assert_relative_eq!(q2.factor("Q1"), 1.05, epsilon = 1e-12);
    assert_relative_eq!(q2.design_value, 12.2);
}

#[test]
fn accidental_combination() {
    let report = generate(&mixed_loads(), &[CombinationRule::UlsAccidental], &EngineSettings::default()).unwrap();

    assert_eq!(report.len(), 1);
    let combo = &report.combinations[0];
    assert_eq!(combo.description, "1.25*G1 + 1.25*G2 + 1.00*E1");
    // 1.25*(5 + 1.5) + 8
    assert_relative_eq!(combo.design_value, 16.125);
}

#[test]
fn accidental_by_category_tiers() {
    let settings = EngineSettings {
        permanent_factors: PermanentFactorMode::ByCategory,
        ..EngineSettings::default()
    };
    let loads = vec![
        Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
        Load::permanent("R1", 1.0, ActionCategory::Settlement),
        Load::exceptional("E1", 8.0),
    ];
    let report = generate(&loads, &[CombinationRule::UlsAccidental], &settings).unwrap();

    // settlement has a zero accidental factor and drops out
    assert_eq!(report.combinations[0].description, "1.10*G1 + 1.00*E1");
}

#[test]
fn validation_errors_produce_no_output() {
    let settings = EngineSettings {
        min_loads: 4,
        ..EngineSettings::default()
    };
    let loads = vec![Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight)];
    let err = generate(&loads, &[CombinationRule::UlsNormal], &settings).unwrap_err();

    assert_eq!(err, ComboError::TooFewLoads { minimum: 4, actual: 1 });
    assert!(err.is_validation());
}

#[test]
fn factor_table_file_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("factors.json");

    let mut table = combo_core::FactorTable::nbr8800();
    table.structures.insert(StructureType::Metal, 1.4);
    std::fs::write(&path, serde_json::to_string(&table).unwrap()).unwrap();

    let settings = EngineSettings {
        factor_table: Some(path),
        ..EngineSettings::default()
    };
    let loads = vec![Load::permanent("G1", 10.0, ActionCategory::MetalSelfWeight)];
    let report = generate(&loads, &[CombinationRule::UlsNormal], &settings).unwrap();

    assert_relative_eq!(report.combinations[0].design_value, 14.0);
}

#[test]
fn zero_principal_factor_never_yields_principal_free_rows() {
    let loads = vec![
        Load::permanent("G1", 5.0, ActionCategory::MetalSelfWeight),
        Load::variable("Q1", 3.0, ActionCategory::GenericVariable, UsageClass::ExceptionalActions),
        Load::variable("Q2", 2.0, ActionCategory::GenericVariable, UsageClass::ExceptionalActions),
    ];
    let report = generate(&loads, &[CombinationRule::UlsFrequent], &EngineSettings::default()).unwrap();

    // no duplicate rows: one permanent-only fallback
    assert_eq!(report.len(), 1);
    assert_eq!(report.combinations[0].description, "1.25*G1");
}
