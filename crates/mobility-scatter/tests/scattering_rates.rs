use mobility_alloy::{derive, CompositionSet, MaterialDatabase, MaterialPoint};
use mobility_core::MobilityError;
use mobility_scatter::{
    fang_howard_g, EngineOpts, FormFactorMode, Mechanism, OperatingCondition, ScatteringContext,
};
use proptest::prelude::*;

fn point_at(composition: f64) -> MaterialPoint {
    let db = MaterialDatabase::builtin();
    let table = derive(
        &db,
        &["AlN", "GaN"],
        "AlGaN",
        Some(CompositionSet::scalar(composition).unwrap()),
    )
    .unwrap();
    table.point(0).unwrap()
}

fn context(composition: f64, carrier_density: f64, condition: &OperatingCondition) -> ScatteringContext {
    ScatteringContext::build(&point_at(composition), carrier_density, condition)
}

#[test]
fn context_kinematics_follow_density_and_material() {
    let ctx = context(0.0, 0.1, &OperatingCondition::default());
    assert!((ctx.fermi_wavevector - (2.0 * std::f64::consts::PI * 0.1).sqrt()).abs() < 1e-12);
    // GaN: m* = 0.2, εs = 8.9
    assert!((ctx.thomas_fermi_wavevector - 37.794_522_492_295_04 * 0.2 / 8.9).abs() < 1e-9);
    assert!((ctx.mass_to_charge - 0.2 * 5.685_630_103_565_723e-12).abs() < 1e-24);
    let a = 0.3189;
    let c = 0.5185;
    assert!((ctx.cell_volume - 3f64.sqrt() / 2.0 * a * a * c).abs() < 1e-12);
}

#[test]
fn every_mechanism_is_positive_at_default_conditions() {
    let condition = OperatingCondition::default();
    let opts = EngineOpts::default();
    for composition in [0.1, 0.25, 0.5, 0.9] {
        let ctx = context(composition, 0.1, &condition);
        for mechanism in Mechanism::ALL {
            let rate = mechanism.rate(&ctx, &opts).unwrap();
            assert!(
                rate.is_finite() && rate > 0.0,
                "{mechanism} at x={composition}: {rate}"
            );
        }
    }
}

#[test]
fn rates_match_reference_values_at_quarter_aluminium() {
    // x = 0.25, n2d = 0.1 nm⁻², default operating point.
    let ctx = context(0.25, 0.1, &OperatingCondition::default());
    let opts = EngineOpts::default();
    let expected = [
        (Mechanism::AlloyDisorder, 3.567712644098e13),
        (Mechanism::InterfaceRoughness, 7.827829796755e10),
        (Mechanism::Dislocation, 1.81664130080e14),
        (Mechanism::PolarOpticalPhonon, 4.408356163617e12),
        (Mechanism::DeformationPotential, 1.140625289391e12),
        (Mechanism::Piezoelectric, 6.954140421847e11),
        (
            Mechanism::AcousticPhonon,
            1.140625289391e12 + 6.954140421847e11,
        ),
    ];
    for (mechanism, reference) in expected {
        let rate = mechanism.rate(&ctx, &opts).unwrap();
        let relative = ((rate - reference) / reference).abs();
        assert!(
            relative < 1e-9,
            "{mechanism}: {rate:e} vs {reference:e} (rel {relative:e})"
        );
    }
}

#[test]
fn alloy_disorder_vanishes_for_pure_binaries() {
    let condition = OperatingCondition::default();
    let opts = EngineOpts::default();
    for composition in [0.0, 1.0, 5e-9, 1.0 - 5e-9] {
        let ctx = context(composition, 0.1, &condition);
        assert_eq!(Mechanism::AlloyDisorder.rate(&ctx, &opts).unwrap(), 0.0);
    }
    let ctx = context(0.5, 0.1, &condition);
    assert!(Mechanism::AlloyDisorder.rate(&ctx, &opts).unwrap() > 0.0);
}

#[test]
fn alloy_disorder_peaks_near_mid_composition() {
    let condition = OperatingCondition::default();
    let opts = EngineOpts::default();
    let rate = |x| {
        Mechanism::AlloyDisorder
            .rate(&context(x, 0.1, &condition), &opts)
            .unwrap()
    };
    assert!(rate(0.5) > rate(0.1));
    assert!(rate(0.5) > rate(0.9));
}

#[test]
fn acoustic_phonon_is_sum_of_deformation_and_piezoelectric() {
    let opts = EngineOpts::default();
    let ctx = context(0.3, 0.12, &OperatingCondition::default());
    let dp = Mechanism::DeformationPotential.rate(&ctx, &opts).unwrap();
    let pe = Mechanism::Piezoelectric.rate(&ctx, &opts).unwrap();
    let ap = Mechanism::AcousticPhonon.rate(&ctx, &opts).unwrap();
    assert_eq!(ap, dp + pe);
}

#[test]
fn zero_dislocation_density_gives_zero_rate() {
    let opts = EngineOpts::default();
    for occupancy in [0.0, 0.1, 0.5, 1.0] {
        let condition = OperatingCondition {
            dislocation_density: 0.0,
            dislocation_occupancy: occupancy,
            ..OperatingCondition::default()
        };
        let ctx = context(0.25, 0.1, &condition);
        assert_eq!(Mechanism::Dislocation.rate(&ctx, &opts).unwrap(), 0.0);
    }
    let uncharged = OperatingCondition {
        dislocation_occupancy: 0.0,
        ..OperatingCondition::default()
    };
    let ctx = context(0.25, 0.1, &uncharged);
    assert_eq!(Mechanism::Dislocation.rate(&ctx, &opts).unwrap(), 0.0);
}

#[test]
fn smooth_interface_gives_zero_roughness_rate() {
    let condition = OperatingCondition {
        rms_roughness: 0.0,
        ..OperatingCondition::default()
    };
    let ctx = context(0.25, 0.1, &condition);
    let rate = Mechanism::InterfaceRoughness
        .rate(&ctx, &EngineOpts::default())
        .unwrap();
    assert_eq!(rate, 0.0);
}

#[test]
fn dislocation_rate_scales_with_charged_density() {
    let opts = EngineOpts::default();
    let base = OperatingCondition::default();
    let doubled = OperatingCondition {
        dislocation_density: 2.0 * base.dislocation_density,
        ..base.clone()
    };
    let r1 = Mechanism::Dislocation
        .rate(&context(0.25, 0.1, &base), &opts)
        .unwrap();
    let r2 = Mechanism::Dislocation
        .rate(&context(0.25, 0.1, &doubled), &opts)
        .unwrap();
    assert!((r2 / r1 - 2.0).abs() < 1e-9);
}

#[test]
fn configurable_floor_silences_low_densities() {
    let opts = EngineOpts {
        carrier_floor: 0.05,
        ..EngineOpts::default()
    };
    let ctx = context(0.25, 0.01, &OperatingCondition::default());
    for mechanism in Mechanism::ALL {
        assert_eq!(mechanism.rate(&ctx, &opts).unwrap(), 0.0);
    }
}

#[test]
fn starved_quadrature_surfaces_mechanism_context() {
    let opts = EngineOpts {
        quadrature: mobility_scatter::QuadratureOpts {
            abs_tol: 1e-300,
            rel_tol: 0.0,
            max_subdivisions: 1,
        },
        ..EngineOpts::default()
    };
    let ctx = context(0.25, 0.1, &OperatingCondition::default());
    let err = Mechanism::InterfaceRoughness
        .rate(&ctx, &opts)
        .expect_err("budget of one interval");
    assert!(matches!(err, MobilityError::Integration(_)));
    assert_eq!(err.info().context.get("mechanism").map(String::as_str), Some("IFR"));
    assert_eq!(
        err.info().context.get("composition").map(String::as_str),
        Some("0.25")
    );
}

#[test]
fn mechanism_names_parse() {
    assert_eq!("AP".parse::<Mechanism>().unwrap(), Mechanism::AcousticPhonon);
    assert_eq!(
        "interface_roughness".parse::<Mechanism>().unwrap(),
        Mechanism::InterfaceRoughness
    );
    let err = "XYZ".parse::<Mechanism>().unwrap_err();
    assert!(matches!(err, MobilityError::Configuration(_)));
    assert_eq!(err.info().code, "unknown-mechanism");
}

#[test]
fn form_factors_follow_mode() {
    let ctx = context(0.25, 0.1, &OperatingCondition::default());
    assert_eq!(FormFactorMode::Dislocation.evaluate(&ctx, 0.7), 1.0);
    assert!((fang_howard_g(1.0) - 1.0).abs() < 1e-15);
    let irf = FormFactorMode::InterfaceRoughness.evaluate(&ctx, 0.0);
    assert!((irf - 1.0).abs() < 1e-15);
    let dp = FormFactorMode::DeformationPotential.evaluate(&ctx, 0.5);
    assert!(dp > 0.0 && dp < 1.0);
    let pop_a = FormFactorMode::PolarOpticalPhonon.evaluate(&ctx, 0.1);
    let pop_b = FormFactorMode::PolarOpticalPhonon.evaluate(&ctx, 0.9);
    assert_eq!(pop_a, pop_b);

    assert_eq!(
        "IFR".parse::<FormFactorMode>().unwrap(),
        FormFactorMode::InterfaceRoughness
    );
    let err = "BULK".parse::<FormFactorMode>().unwrap_err();
    assert_eq!(err.info().code, "unknown-form-factor");
}

proptest! {
    #[test]
    fn below_floor_every_rate_is_zero(density in 0.0f64..1e-10, composition in 0.0f64..=1.0) {
        let ctx = context(composition, density, &OperatingCondition::default());
        let opts = EngineOpts::default();
        for mechanism in Mechanism::ALL {
            prop_assert_eq!(mechanism.rate(&ctx, &opts).unwrap(), 0.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn rates_are_finite_and_non_negative(density in 1e-3f64..5.0, composition in 0.0f64..=1.0) {
        let ctx = context(composition, density, &OperatingCondition::default());
        let opts = EngineOpts::default();
        for mechanism in Mechanism::ALL {
            let rate = mechanism.rate(&ctx, &opts).unwrap();
            prop_assert!(rate.is_finite() && rate >= 0.0);
        }
    }
}
