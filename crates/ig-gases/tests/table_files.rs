//! Loading gas tables from YAML and JSON files.

#![cfg(feature = "serde")]

use ig_gases::{GasError, GasTable};

const YAML_TABLE: &str = r#"
gases:
  - id: N2
    name: Nitrogen
    aliases: [nitrogen]
    molar_mass: 28.014
    cp: 29.124
    cv: 20.810
    vdw_a: 137.0
    vdw_b: 0.0387
  - id: SF6
    name: Sulfur Hexafluoride
    molar_mass: 146.06
    cp: 97.0
    cv: 88.7
    vdw_a: 785.7
    vdw_b: 0.0879
"#;

#[test]
fn yaml_table_loads_and_validates() {
    let table = GasTable::from_yaml_str(YAML_TABLE).unwrap();
    assert_eq!(table.len(), 2);

    let sf6 = table.find("sulfur hexafluoride").unwrap();
    assert!(sf6.aliases.is_empty());
    assert!((sf6.properties.molar_mass - 146.06).abs() < 1e-12);
    assert_eq!(table.find("nitrogen").unwrap().id, "N2");
}

#[test]
fn json_table_loads() {
    let json = r#"{"gases":[{"id":"He","name":"Helium","molar_mass":4.003,"cp":20.786,"cv":12.472,"vdw_a":3.46,"vdw_b":0.0238}]}"#;
    let table = GasTable::from_json_str(json).unwrap();
    assert!((table.get("he").unwrap().properties.gamma() - 20.786 / 12.472).abs() < 1e-12);
}

#[test]
fn invalid_record_is_rejected() {
    let yaml = r#"
gases:
  - id: Bad
    name: Bad Gas
    molar_mass: 10.0
    cp: 5.0
    cv: 9.0
    vdw_a: 0.0
    vdw_b: 0.0
"#;
    let err = GasTable::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, GasError::InvalidProperty { .. }));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let err = GasTable::from_yaml_str("gases: [ {id: N2").unwrap_err();
    assert!(matches!(err, GasError::Parse { .. }));
}

#[test]
fn builtin_table_survives_yaml_round_trip() {
    let table = GasTable::builtin();
    let text = table.to_yaml_string().unwrap();
    let reloaded = GasTable::from_yaml_str(&text).unwrap();
    assert_eq!(reloaded, table);
}
