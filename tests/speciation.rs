use carbonate_rs::{Calibration, SaturationCondition, carbonate_alphas, equilibrium_constants};

#[test]
fn alpha_fractions_sum_to_one_across_the_domain() {
    let cal = Calibration::default();
    for t_c in [0.0, 15.0, 30.0, 45.0, 60.0] {
        for tds in [0.0, 250.0, 1000.0, 2000.0] {
            let k = equilibrium_constants(t_c, tds, &cal);
            let mut ph = 4.0;
            while ph <= 12.0 {
                let a = carbonate_alphas(10f64.powf(-ph), &k);
                let sum = a.alpha0 + a.alpha1 + a.alpha2;
                assert!(
                    (sum - 1.0).abs() < 1e-9,
                    "alpha sum {sum} at t={t_c} tds={tds} ph={ph}"
                );
                for frac in [a.alpha0, a.alpha1, a.alpha2] {
                    assert!((0.0..=1.0).contains(&frac));
                }
                ph += 0.5;
            }
        }
    }
}

#[test]
fn speciation_shifts_from_carbonic_acid_to_carbonate_with_ph() {
    let cal = Calibration::default();
    let k = equilibrium_constants(25.0, 300.0, &cal);

    let acidic = carbonate_alphas(10f64.powf(-4.5), &k);
    assert!(acidic.alpha0 > 0.9, "alpha0 at ph 4.5: {}", acidic.alpha0);

    let neutral = carbonate_alphas(10f64.powf(-7.8), &k);
    assert!(neutral.alpha1 > 0.9, "alpha1 at ph 7.8: {}", neutral.alpha1);

    let basic = carbonate_alphas(10f64.powf(-11.5), &k);
    assert!(basic.alpha2 > 0.9, "alpha2 at ph 11.5: {}", basic.alpha2);
}

#[test]
fn carbonate_fraction_increases_monotonically_with_ph() {
    let cal = Calibration::default();
    let k = equilibrium_constants(20.0, 200.0, &cal);
    let mut prev = 0.0;
    let mut ph = 4.0;
    while ph <= 12.0 {
        let a = carbonate_alphas(10f64.powf(-ph), &k);
        assert!(a.alpha2 >= prev, "alpha2 not monotone at ph {ph}");
        prev = a.alpha2;
        ph += 0.25;
    }
}

#[test]
fn classification_band_is_symmetric() {
    let threshold = Calibration::default().lsi_threshold;
    assert_eq!(
        SaturationCondition::classify(threshold + 0.01, threshold),
        SaturationCondition::Oversaturated
    );
    assert_eq!(
        SaturationCondition::classify(-threshold - 0.01, threshold),
        SaturationCondition::Undersaturated
    );
    for lsi in [-threshold, -threshold / 2.0, 0.0, threshold / 2.0, threshold] {
        assert_eq!(
            SaturationCondition::classify(lsi, threshold),
            SaturationCondition::Saturated,
            "lsi {lsi} should sit inside the band"
        );
    }
}

#[test]
fn partial_calibration_json_overrides_only_named_fields() {
    let cal: Calibration = serde_json::from_str(r#"{ "lsi_threshold": 0.05 }"#).unwrap();
    let default = Calibration::default();
    assert_eq!(cal.lsi_threshold, 0.05);
    assert_eq!(cal.ionic_strength_per_tds, default.ionic_strength_per_tds);
    assert_eq!(cal.molar_mass_caco3, default.molar_mass_caco3);
}
