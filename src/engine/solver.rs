//! Root-finding primitives for the carbonate system.
//!
//! All solvers are fixed-iteration bisections: the functions they invert are
//! monotone over the chosen brackets, so a fixed budget gives deterministic
//! latency and ~1e-12 pH-unit resolution without derivatives or initial
//! guesses. Newton-style iteration diverges near the CT -> 0 and extreme-pH
//! edges of this system, so robustness is traded for iteration count.

use crate::chemistry::{EquilibriumConstants, TINY, carbonate_alphas};

/// pH bracket for the alkalinity inversion; wide enough that any physically
/// plausible potable-water alkalinity/CT pair has its root inside.
pub const PH_BRACKET: (f64, f64) = (4.0, 13.0);
pub const PH_SOLVE_ITERATIONS: usize = 40;

/// pH bracket for the saturation-pH search.
pub const SATURATION_PH_BRACKET: (f64, f64) = (5.0, 12.0);
pub const SATURATION_PH_ITERATIONS: usize = 40;

/// Charge-balance alkalinity (eq/L) at a trial pH for a fixed total
/// inorganic carbon: `Alk = CT·(α1 + 2α2) + Kw/(aH·γ1) − aH/γ1`.
///
/// Strictly increasing in pH over [`PH_BRACKET`], which is what makes the
/// bisection direction in [`solve_ph_for_alkalinity`] well-defined.
pub fn calculated_alkalinity(ph: f64, ct_mol: f64, k: &EquilibriumConstants) -> f64 {
    let a_h = 10f64.powf(-ph);
    let a = carbonate_alphas(a_h, k);
    ct_mol * (a.alpha1 + 2.0 * a.alpha2) + k.kw / (a_h * k.gamma1) - a_h / k.gamma1
}

/// Total inorganic carbon (mol/L) consistent with a measured pH and
/// alkalinity, obtained algebraically: once pH fixes the alphas, the
/// alkalinity definition is linear in CT and needs no search.
///
/// May return a non-positive value when hydroxide alone exceeds the given
/// alkalinity (pH far above the potable range); callers decide how to score
/// that regime.
pub fn total_carbon_from_alkalinity(ph: f64, alk_eq: f64, k: &EquilibriumConstants) -> f64 {
    let a_h = 10f64.powf(-ph);
    let a = carbonate_alphas(a_h, k);
    let carbonate_eq_per_mol = a.alpha1 + 2.0 * a.alpha2;
    (alk_eq - k.kw / (a_h * k.gamma1) + a_h / k.gamma1) / carbonate_eq_per_mol.max(TINY)
}

/// Find the pH at which the calculated alkalinity equals `target_alk_eq`
/// for the given total inorganic carbon.
///
/// Fixed 40-iteration bisection over [`PH_BRACKET`]; returns the midpoint of
/// the final bracket, treated as exact within numerical tolerance.
pub fn solve_ph_for_alkalinity(
    target_alk_eq: f64,
    ct_mol: f64,
    k: &EquilibriumConstants,
) -> f64 {
    let (mut lo, mut hi) = PH_BRACKET;
    for _ in 0..PH_SOLVE_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if calculated_alkalinity(mid, ct_mol, k) < target_alk_eq {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Calcite saturation index: `log10(aCa · aCO3 / Ks)` with activities formed
/// from molar concentrations and the divalent coefficient. Zero at exact
/// saturation, positive when supersaturated.
pub fn saturation_index(ca_mol: f64, co3_mol: f64, k: &EquilibriumConstants) -> f64 {
    let iap = ca_mol.max(TINY) * k.gamma2 * co3_mol.max(TINY) * k.gamma2;
    (iap / k.ks).log10()
}

/// pH at which the current calcium and alkalinity would be exactly
/// saturated (IAP = Ks), holding alkalinity fixed and letting CT follow.
///
/// The saturation index rises with pH over the bracket. Trial pH values
/// where hydroxide alone exceeds the fixed alkalinity leave no room for a
/// positive CT; those trials are scored supersaturated so the bracket
/// retreats toward the physical root below them.
pub fn saturation_ph(ca_mol: f64, alk_eq: f64, k: &EquilibriumConstants) -> f64 {
    let (mut lo, mut hi) = SATURATION_PH_BRACKET;
    for _ in 0..SATURATION_PH_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        let ct = total_carbon_from_alkalinity(mid, alk_eq, k);
        let si = if ct > 0.0 {
            let a = carbonate_alphas(10f64.powf(-mid), k);
            saturation_index(ca_mol, ct * a.alpha2, k)
        } else {
            f64::INFINITY
        };
        if si < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
