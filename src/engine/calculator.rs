use log::debug;

use crate::chemistry::{self, EquilibriumConstants, carbonate_alphas, eq_per_l, mol_per_l, round_to};
use crate::engine::solver::{
    saturation_index, saturation_ph, solve_ph_for_alkalinity, total_carbon_from_alkalinity,
};
use crate::error::EngineError;
use crate::models::{
    CalculationResult, Calibration, SaturationCondition, TargetVariable, WaterParameters,
};

/// Iteration budget for the outer CCPP bisection.
pub const CCPP_ITERATIONS: usize = 60;
/// Iteration budget for the inverse (target-CCPP) bisection.
pub const TARGET_ITERATIONS: usize = 45;
/// pH search bracket for the inverse solver.
pub const TARGET_PH_BRACKET: (f64, f64) = (6.0, 10.0);
/// Calcium search bracket (mg/L as CaCO3) for the inverse solver. The lower
/// end is a hair above zero because zero calcium is outside the input domain.
pub const TARGET_CA_BRACKET_MG_L: (f64, f64) = (1e-3, 500.0);

/// Decimal digits kept on reported values.
const REPORT_DIGITS: i32 = 4;

/// Evaluate the scaling/corrosion tendency of one water sample.
///
/// Pipeline (pure function of `(params, cal)`, no retained state):
/// 1. Derive equilibrium constants and activity coefficients from
///    temperature and TDS.
/// 2. Convert calcium (mg/L as CaCO3) to mol/L and alkalinity to eq/L with
///    the single molar-mass pair from `cal` — the same constants are used
///    again on output, so input and output conventions cannot diverge.
/// 3. Recover total inorganic carbon algebraically from the measured pH and
///    alkalinity.
/// 4. LSI from the ion activity product at the measured pH.
/// 5. Saturation pH holding the current alkalinity fixed.
/// 6. CCPP: outer bisection over the moles of CaCO3 transferred until the
///    re-equilibrated solution sits exactly at saturation.
/// 7. Equilibrium pH/alkalinity/calcium from the converged transfer,
///    floored at zero for reporting.
/// 8. Classification of the LSI against the symmetric calibrated band.
///
/// Returns `EngineError` for inputs outside the documented domain; never
/// clamps caller-supplied values.
pub fn evaluate(
    params: &WaterParameters,
    cal: &Calibration,
) -> Result<CalculationResult, EngineError> {
    params.validate()?;

    let k = chemistry::equilibrium_constants(params.t_c, params.tds, cal);
    let ca_mol = mol_per_l(params.ca, cal.molar_mass_caco3);
    let alk_eq = eq_per_l(params.alk, cal.mg_per_meq_as_caco3);

    let ct_raw = total_carbon_from_alkalinity(params.ph, alk_eq, &k);
    if ct_raw <= 0.0 {
        debug!(
            "total inorganic carbon non-positive ({ct_raw:.3e}) at ph={}, flooring",
            params.ph
        );
    }
    let ct = ct_raw.max(cal.concentration_floor_mol);

    let a = carbonate_alphas(10f64.powf(-params.ph), &k);
    let lsi = saturation_index(ca_mol, ct * a.alpha2, &k);
    let ph_s = saturation_ph(ca_mol, alk_eq, &k);

    // Transferred moles of CaCO3, positive = precipitation. The saturation
    // index after re-equilibration decreases with the transfer, so the
    // bisection moves the lower bound while the trial stays supersaturated.
    let bracket_mol = cal.ccpp_bracket_mg_l / 1000.0 / cal.molar_mass_caco3;
    let (mut lo, mut hi) = (-bracket_mol, bracket_mol);
    for _ in 0..CCPP_ITERATIONS {
        let x = 0.5 * (lo + hi);
        if transfer_saturation_index(x, ca_mol, alk_eq, ct, &k, cal) > 0.0 {
            lo = x;
        } else {
            hi = x;
        }
    }
    let transfer_mol = 0.5 * (lo + hi);

    // Equilibrium state at the converged transfer, floored at zero for
    // reporting; the pH solve sees the same floored quantities.
    let eq_ca_mol = (ca_mol - transfer_mol).max(0.0);
    let eq_alk_eq = (alk_eq - 2.0 * transfer_mol).max(0.0);
    let eq_ct = (ct - transfer_mol).max(cal.concentration_floor_mol);
    let eq_ph = solve_ph_for_alkalinity(
        eq_alk_eq.max(cal.concentration_floor_mol),
        eq_ct,
        &k,
    );

    let ccpp = transfer_mol * cal.molar_mass_caco3 * 1000.0;
    debug!(
        "evaluate: lsi={lsi:.4} ccpp={ccpp:.4} saturation_ph={ph_s:.4} equilibrium_ph={eq_ph:.4}"
    );

    Ok(CalculationResult {
        lsi: round_to(lsi, REPORT_DIGITS),
        ccpp: round_to(ccpp, REPORT_DIGITS),
        saturation_ph: round_to(ph_s, REPORT_DIGITS),
        saturation_condition: SaturationCondition::classify(lsi, cal.lsi_threshold),
        equilibrium_ph: round_to(eq_ph, REPORT_DIGITS),
        equilibrium_alk: round_to(eq_alk_eq * cal.mg_per_meq_as_caco3 * 1000.0, REPORT_DIGITS),
        equilibrium_ca: round_to(eq_ca_mol * cal.molar_mass_caco3 * 1000.0, REPORT_DIGITS),
    })
}

/// Saturation index of the solution after transferring `x` mol/L of CaCO3
/// out of it (precipitation removes one mole of Ca and CT and two
/// equivalents of alkalinity per mole).
///
/// A trial past the exhaustion point of any pool cannot be fed to the pH
/// solver; it is scored with the sign that pushes the bracket back toward
/// the valid region (undersaturated for excessive precipitation,
/// supersaturated for excessive dissolution). Valid trials are floored at
/// the calibration floor before the pH solve.
fn transfer_saturation_index(
    x: f64,
    ca_mol: f64,
    alk_eq: f64,
    ct_mol: f64,
    k: &EquilibriumConstants,
    cal: &Calibration,
) -> f64 {
    let ca = ca_mol - x;
    let alk = alk_eq - 2.0 * x;
    let ct = ct_mol - x;
    if ca <= 0.0 || alk <= 0.0 || ct <= 0.0 {
        return if x > 0.0 {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let ca = ca.max(cal.concentration_floor_mol);
    let alk = alk.max(cal.concentration_floor_mol);
    let ct = ct.max(cal.concentration_floor_mol);
    let ph = solve_ph_for_alkalinity(alk, ct, k);
    let a = carbonate_alphas(10f64.powf(-ph), k);
    saturation_index(ca, ct * a.alpha2, k)
}

/// Inverse solve: the pH or calcium dose at which the water's CCPP equals
/// `target_ccpp` (mg/L as CaCO3), all other parameters held fixed.
///
/// CCPP increases monotonically in both free variables over the practical
/// domain, so an outer bisection over the variable suffices. The bracket
/// endpoints are evaluated first; a target outside the reachable CCPP range
/// is reported as [`EngineError::TargetUnreachable`] rather than silently
/// returning a bracket boundary.
pub fn solve_for_target(
    params: &WaterParameters,
    cal: &Calibration,
    target_ccpp: f64,
    variable: TargetVariable,
) -> Result<f64, EngineError> {
    params.validate()?;

    let (mut lo, mut hi) = match variable {
        TargetVariable::Ph => TARGET_PH_BRACKET,
        TargetVariable::Calcium => TARGET_CA_BRACKET_MG_L,
    };

    let ccpp_lo = evaluate(&with_variable(params, variable, lo), cal)?.ccpp;
    let ccpp_hi = evaluate(&with_variable(params, variable, hi), cal)?.ccpp;
    if target_ccpp < ccpp_lo || target_ccpp > ccpp_hi {
        debug!(
            "target ccpp {target_ccpp} outside reachable range [{ccpp_lo:.4}, {ccpp_hi:.4}] for {variable}"
        );
        return Err(EngineError::TargetUnreachable {
            target: target_ccpp,
            variable,
            lo,
            hi,
        });
    }

    for _ in 0..TARGET_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        let ccpp = evaluate(&with_variable(params, variable, mid), cal)?.ccpp;
        if ccpp < target_ccpp {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok(round_to(0.5 * (lo + hi), REPORT_DIGITS))
}

fn with_variable(
    params: &WaterParameters,
    variable: TargetVariable,
    value: f64,
) -> WaterParameters {
    let mut p = *params;
    match variable {
        TargetVariable::Ph => p.ph = value,
        TargetVariable::Calcium => p.ca = value,
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WaterParameters {
        WaterParameters {
            ph: 7.8,
            t_c: 20.0,
            tds: 200.0,
            ca: 150.0,
            alk: 120.0,
        }
    }

    #[test]
    fn rejects_non_positive_calcium() {
        let params = WaterParameters { ca: 0.0, ..sample() };
        let err = evaluate(&params, &Calibration::default()).unwrap_err();
        assert!(matches!(err, EngineError::NonPositive { name: "ca", .. }));
    }

    #[test]
    fn rejects_temperature_outside_domain() {
        let params = WaterParameters { t_c: 75.0, ..sample() };
        let err = evaluate(&params, &Calibration::default()).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { name: "t_c", .. }));
    }

    #[test]
    fn ccpp_sign_agrees_with_lsi() {
        let cal = Calibration::default();
        let res = evaluate(&sample(), &cal).unwrap();
        assert_eq!(res.lsi > 0.0, res.ccpp > 0.0);

        let corrosive = WaterParameters { ph: 6.6, ..sample() };
        let res = evaluate(&corrosive, &cal).unwrap();
        assert!(res.lsi < 0.0);
        assert!(res.ccpp < 0.0);
    }

    #[test]
    fn saturation_ph_is_the_lsi_zero_crossing() {
        let cal = Calibration::default();
        let res = evaluate(&sample(), &cal).unwrap();
        let at_saturation = WaterParameters {
            ph: res.saturation_ph,
            ..sample()
        };
        let res2 = evaluate(&at_saturation, &cal).unwrap();
        assert!(res2.lsi.abs() < 1e-3, "lsi at saturation pH: {}", res2.lsi);
    }
}
