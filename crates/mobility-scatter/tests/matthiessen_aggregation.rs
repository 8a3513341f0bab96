use mobility_alloy::{derive, CompositionSet, MaterialDatabase};
use mobility_core::is_undefined;
use mobility_scatter::{
    aggregate, mobility_from_rate, AggregationMode, EngineOpts, Mechanism, MechanismSelection,
    OperatingCondition, ScatteringContext, TOTAL_COLUMN,
};

fn context_with(condition: &OperatingCondition, composition: f64) -> ScatteringContext {
    let db = MaterialDatabase::builtin();
    let table = derive(
        &db,
        &["AlN", "GaN"],
        "AlGaN",
        Some(CompositionSet::scalar(composition).unwrap()),
    )
    .unwrap();
    let point = table.point(0).unwrap();
    ScatteringContext::build(&point, condition.carrier_density.at(0), condition)
}

fn context() -> ScatteringContext {
    context_with(&OperatingCondition::default(), 0.25)
}

#[test]
fn total_is_matthiessen_sum_of_columns() {
    let ctx = context();
    let selection = MechanismSelection::all().with_rates(true);
    let record = aggregate(&ctx, &selection, &EngineOpts::default()).unwrap();

    let labels: Vec<&str> = record.mobility.keys().map(String::as_str).collect();
    assert_eq!(labels, ["AD", "IFR", "DIS", "POP", "AP", "TOT"]);

    let summed: f64 = ["AD", "IFR", "DIS", "POP", "AP"]
        .iter()
        .map(|label| record.rate(label).unwrap())
        .sum();
    let total_rate = record.rate(TOTAL_COLUMN).unwrap();
    assert!((summed - total_rate).abs() <= 1e-12 * total_rate);

    let inverse_sum: f64 = ["AD", "IFR", "DIS", "POP", "AP"]
        .iter()
        .map(|label| 1.0 / record.get(label).unwrap())
        .sum();
    let total = record.total().unwrap();
    assert!((1.0 / inverse_sum - total).abs() <= 1e-9 * total);
    assert_eq!(record.mass_to_charge, Some(ctx.mass_to_charge));
}

#[test]
fn acoustic_phonon_alone_matches_split_components() {
    let ctx = context();
    let opts = EngineOpts::default();
    let combined = aggregate(
        &ctx,
        &MechanismSelection::new([Mechanism::AcousticPhonon]).total_only(),
        &opts,
    )
    .unwrap();
    let split = aggregate(
        &ctx,
        &MechanismSelection::new([Mechanism::DeformationPotential, Mechanism::Piezoelectric])
            .total_only(),
        &opts,
    )
    .unwrap();
    assert_eq!(combined.total(), split.total());
}

#[test]
fn acoustic_phonon_with_components_does_not_double_count() {
    let ctx = context();
    let opts = EngineOpts::default();
    let ap_only = aggregate(
        &ctx,
        &MechanismSelection::new([Mechanism::AcousticPhonon]),
        &opts,
    )
    .unwrap();
    let everything = MechanismSelection::new([
        Mechanism::AcousticPhonon,
        Mechanism::DeformationPotential,
        Mechanism::Piezoelectric,
    ]);
    assert_eq!(everything.summed_mechanisms(), vec![Mechanism::AcousticPhonon]);
    let record = aggregate(&ctx, &everything, &opts).unwrap();

    assert_eq!(record.total(), ap_only.total());
    let labels: Vec<&str> = record.mobility.keys().map(String::as_str).collect();
    assert_eq!(labels, ["AP", "DP", "PE", "TOT"]);
    let dp = record.get("DP").unwrap();
    let pe = record.get("PE").unwrap();
    let ap = record.get("AP").unwrap();
    assert!((1.0 / (1.0 / dp + 1.0 / pe) - ap).abs() <= 1e-9 * ap);
}

#[test]
fn total_only_emits_a_single_column() {
    let record = aggregate(
        &context(),
        &MechanismSelection::all().total_only(),
        &EngineOpts::default(),
    )
    .unwrap();
    assert_eq!(record.mobility.len(), 1);
    assert!(record.total().unwrap() > 0.0);
    assert!(record.scattering_rates.is_empty());
    assert!(record.mass_to_charge.is_none());
}

#[test]
fn breakdown_without_total_omits_tot() {
    let selection = MechanismSelection::new([Mechanism::PolarOpticalPhonon]).breakdown(false);
    assert_eq!(
        selection.mode,
        AggregationMode::Breakdown {
            include_total: false
        }
    );
    let record = aggregate(&context(), &selection, &EngineOpts::default()).unwrap();
    assert!(record.total().is_none());
    assert!(record.get("POP").unwrap() > 0.0);
}

#[test]
fn zero_rate_maps_to_undefined_mobility() {
    let condition = OperatingCondition {
        dislocation_density: 0.0,
        ..OperatingCondition::default()
    };
    let ctx = context_with(&condition, 0.25);
    let record = aggregate(
        &ctx,
        &MechanismSelection::new([Mechanism::Dislocation]),
        &EngineOpts::default(),
    )
    .unwrap();
    assert!(is_undefined(record.get("DIS").unwrap()));
    assert!(is_undefined(record.total().unwrap()));
}

#[test]
fn pure_binary_alloy_disorder_is_undefined_but_total_is_not() {
    let ctx = context_with(&OperatingCondition::default(), 0.0);
    let record = aggregate(&ctx, &MechanismSelection::all(), &EngineOpts::default()).unwrap();
    assert!(is_undefined(record.get("AD").unwrap()));
    let total = record.total().unwrap();
    assert!(total.is_finite() && total > 0.0);
}

#[test]
fn empty_carrier_gas_is_undefined_everywhere() {
    let condition = OperatingCondition {
        carrier_density: 0.0.into(),
        ..OperatingCondition::default()
    };
    let ctx = context_with(&condition, 0.5);
    let record = aggregate(&ctx, &MechanismSelection::all(), &EngineOpts::default()).unwrap();
    for value in record.mobility.values() {
        assert!(is_undefined(*value));
    }
}

#[test]
fn mobility_conversion() {
    assert!(is_undefined(mobility_from_rate(1e-12, 0.0)));
    let mobility = mobility_from_rate(2e-12, 5e12);
    assert!((mobility - 1e4 / 10.0).abs() < 1e-9);
}

#[test]
fn selection_parsing() {
    let selection = MechanismSelection::from_labels(&["POP", "alloy_disorder", "AP"]).unwrap();
    let ordered: Vec<Mechanism> = selection.mechanisms.iter().copied().collect();
    assert_eq!(
        ordered,
        [
            Mechanism::AlloyDisorder,
            Mechanism::PolarOpticalPhonon,
            Mechanism::AcousticPhonon
        ]
    );

    let err = MechanismSelection::from_labels(&["AD", "phonons"]).unwrap_err();
    assert_eq!(err.info().code, "unknown-mechanism");
}

#[test]
fn empty_selection_totals_to_undefined() {
    let ctx = context();
    let empty = MechanismSelection::new(Vec::<Mechanism>::new());

    let record = aggregate(&ctx, &empty.clone().total_only(), &EngineOpts::default()).unwrap();
    assert!(is_undefined(record.total().unwrap()));

    let record = aggregate(&ctx, &empty.clone().with_rates(true), &EngineOpts::default()).unwrap();
    assert_eq!(record.mobility.len(), 1);
    assert!(is_undefined(record.total().unwrap()));
    assert_eq!(record.rate(TOTAL_COLUMN), Some(0.0));

    let record = aggregate(&ctx, &empty.breakdown(false), &EngineOpts::default()).unwrap();
    assert!(record.mobility.is_empty());
    assert_eq!(record.total(), None);
}
