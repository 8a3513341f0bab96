use std::fs;

use mobility_core::{is_undefined, MobilityError};
use mobility_scatter::{run, AggregationMode, RunConfig};

const SCAN_YAML: &str = r#"
material:
  binaries: [AlN, GaN]
  alloy: AlGaN
compositions: {start: 0.1, stop: 0.5, num: 5}
condition:
  carrier_density: 0.1
  temperature: 300
mechanisms: [AD, IFR, DIS, POP, AP]
aggregation:
  include_total: true
  record_rates: true
threads: 2
derived:
  column: TOT
  figure_of_merit:
    mode: LFOM
    temperature_corrected_bandgap: true
"#;

#[test]
fn defaults_mirror_library_defaults() {
    let config = RunConfig::from_yaml_slice(b"{}").unwrap();
    assert_eq!(config, RunConfig::default());
    assert_eq!(config.binaries(), vec!["AlN", "GaN"]);
    assert_eq!(config.mechanisms, vec!["AD", "IFR", "DIS", "POP", "AP"]);
    assert!(config.composition_set().unwrap().is_none());
    let selection = config.selection().unwrap();
    assert_eq!(
        selection.mode,
        AggregationMode::Breakdown {
            include_total: true
        }
    );
}

#[test]
fn yaml_config_runs_end_to_end() {
    let config = RunConfig::from_yaml_slice(SCAN_YAML.as_bytes()).unwrap();
    let output = run(&config).unwrap();

    assert_eq!(output.alloy.len(), 5);
    assert_eq!(output.table.len(), 5);
    let compositions = output.table.compositions();
    assert!((compositions[0] - 0.1).abs() < 1e-12);
    assert!((compositions[4] - 0.5).abs() < 1e-12);
    assert!(output.table.records[0].rate("TOT").is_some());

    let derived = output.derived.expect("derived block");
    assert_eq!(derived.column, "TOT");
    let sheet = derived.sheet_resistance.expect("sheet resistance");
    let fom = derived.figure_of_merit.expect("figure of merit");
    assert_eq!(sheet.len(), 5);
    assert_eq!(fom.len(), 5);
    assert!(sheet.iter().chain(&fom).all(|value| value.is_finite() && *value > 0.0));

    let provenance = &output.provenance;
    assert_eq!(provenance.config_hash.len(), 64);
    assert_eq!(provenance.table_hash.len(), 64);
    assert!(!provenance.created_at.is_empty());
    assert_eq!(provenance.tool_versions.get("model").map(String::as_str), Some("Bassaler"));
}

#[test]
fn identical_configs_hash_identically() {
    let config = RunConfig::from_yaml_slice(SCAN_YAML.as_bytes()).unwrap();
    let first = run(&config).unwrap();
    let second = run(&config).unwrap();
    assert_eq!(first.provenance.config_hash, second.provenance.config_hash);
    assert_eq!(first.provenance.table_hash, second.provenance.table_hash);
    assert_eq!(first.provenance.database_hash, second.provenance.database_hash);
}

#[test]
fn config_loads_from_disk_with_database_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("bowing.yaml");
    fs::write(
        &db_path,
        "AlGaN:\n  mass_density: 0\n  lattice_a0: 0\n  lattice_c0: 0\n  bandgap: 1.0\n  bandgap_alpha: 0\n  bandgap_beta: 0\n  e_effective_mass: 0\n  alloy_scattering_potential: 0\n  static_dielectric_constant: 0\n  high_frequency_dielectric_constant: 0\n  LA_phonon_velocity: 0\n  TA_phonon_velocity: 0\n  deformation_potential: 0\n  PO_phonon_energy: 0\n  electromechanical_coupling_const: 0\n",
    )
    .unwrap();
    let config_path = dir.path().join("run.yaml");
    fs::write(
        &config_path,
        format!(
            "material:\n  database: {}\ncompositions: 0.5\nmechanisms: [POP]\n",
            db_path.display()
        ),
    )
    .unwrap();

    let config = RunConfig::load(&config_path).unwrap();
    let output = run(&config).unwrap();
    let gap = output
        .alloy
        .column(mobility_alloy::MaterialParameter::Bandgap)
        .unwrap()[0];
    assert!((gap - (0.5 * 6.2 + 0.5 * 3.43 - 0.25)).abs() < 1e-12);
    assert_eq!(output.table.column_labels(), vec!["POP", "TOT"]);
}

#[test]
fn unknown_names_are_configuration_errors() {
    let cases = [
        ("model: Drude\n", "unknown-model"),
        ("mechanisms: [AD, XYZ]\n", "unknown-mechanism"),
        ("material:\n  system: quaternary\n", "unsupported-system"),
        (
            "derived:\n  figure_of_merit:\n    mode: BFOM\n",
            "unknown-fom",
        ),
        (
            "derived:\n  figure_of_merit:\n    direct_bandgap: false\n",
            "bandgap-kind",
        ),
        ("compositions: [0.2, 1.5]\n", "composition-range"),
    ];
    for (yaml, code) in cases {
        let config = RunConfig::from_yaml_slice(yaml.as_bytes()).unwrap();
        let err = run(&config).unwrap_err();
        assert!(
            matches!(err, MobilityError::Configuration(_)),
            "{yaml}: {err}"
        );
        assert_eq!(err.info().code, code, "{yaml}");
    }
}

#[test]
fn empty_mechanism_list_yields_undefined_totals() {
    let yaml = "compositions: [0.2, 0.4]\nmechanisms: []\nderived:\n  column: TOT\n";
    let config = RunConfig::from_yaml_slice(yaml.as_bytes()).unwrap();
    let output = run(&config).unwrap();
    assert_eq!(output.table.column_labels(), vec!["TOT"]);
    let total = output.table.column("TOT").unwrap();
    assert_eq!(total.len(), 2);
    assert!(total.iter().all(|mu| is_undefined(*mu)));
    let derived = output.derived.unwrap();
    let sheet = derived.sheet_resistance.unwrap();
    assert!(sheet.iter().all(|rs| is_undefined(*rs)));
}

#[test]
fn derived_column_must_exist() {
    let yaml = "mechanisms: [POP]\naggregation:\n  include_total: false\nderived:\n  column: TOT\n";
    let config = RunConfig::from_yaml_slice(yaml.as_bytes()).unwrap();
    let err = run(&config).unwrap_err();
    assert_eq!(err.info().code, "unknown-column");
}

#[test]
fn missing_config_file_is_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RunConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, MobilityError::Serde(_)));
    assert_eq!(err.info().code, "config_read");
}
