use core::fmt;

use serde::{Deserialize, Serialize};

use crate::chemistry;
use crate::error::EngineError;

/// Measured water quality parameters, immutable per evaluation.
///
/// `ca` and `alk` are mg/L as CaCO3 equivalents; `tds` is mg/L; `t_c` is °C.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WaterParameters {
    pub ph: f64,
    pub t_c: f64,
    pub tds: f64,
    pub ca: f64,
    pub alk: f64,
}

impl WaterParameters {
    /// Fail-fast domain check: pH in (0, 14), temperature in [0, 60] °C,
    /// TDS >= 0, calcium and alkalinity strictly positive.
    ///
    /// Inputs outside this domain are rejected rather than clamped; internal
    /// flooring during iterative adjustment is a solver stability tactic and
    /// never applies to caller-supplied values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.ph > 0.0 && self.ph < 14.0) {
            return Err(EngineError::OutOfRange {
                name: "ph",
                value: self.ph,
                min: 0.0,
                max: 14.0,
            });
        }
        if !(0.0..=60.0).contains(&self.t_c) {
            return Err(EngineError::OutOfRange {
                name: "t_c",
                value: self.t_c,
                min: 0.0,
                max: 60.0,
            });
        }
        if !(self.tds >= 0.0) {
            return Err(EngineError::NonNegativeRequired {
                name: "tds",
                value: self.tds,
            });
        }
        if !(self.ca > 0.0) {
            return Err(EngineError::NonPositive {
                name: "ca",
                value: self.ca,
            });
        }
        if !(self.alk > 0.0) {
            return Err(EngineError::NonPositive {
                name: "alk",
                value: self.alk,
            });
        }
        Ok(())
    }
}

/// Calibration constants for the equilibrium engine.
///
/// Historical variants of this engine disagree on several numeric constants
/// (ionic-strength coefficient, Ks offset, molar masses, classification
/// band). Each lives here as a named field so the engine can be validated
/// against a chosen reference standard without code changes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Ionic strength per mg/L TDS (mol/L per mg/L).
    pub ionic_strength_per_tds: f64,
    /// Additive offset on log10 Ks for benchmark calibration.
    pub log_ks_offset: f64,
    /// Symmetric LSI band classified as Saturated.
    pub lsi_threshold: f64,
    /// Molar mass of CaCO3 (g/mol); applied for calcium and CCPP alike.
    pub molar_mass_caco3: f64,
    /// Alkalinity equivalent weight (mg/meq as CaCO3).
    pub mg_per_meq_as_caco3: f64,
    /// Floor for intermediate concentrations during the CCPP search.
    pub concentration_floor_mol: f64,
    /// Half-width of the CCPP bisection bracket, mg/L as CaCO3.
    pub ccpp_bracket_mg_l: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            ionic_strength_per_tds: chemistry::IONIC_STRENGTH_PER_TDS_DEFAULT,
            log_ks_offset: chemistry::LOG_KS_OFFSET_DEFAULT,
            lsi_threshold: chemistry::LSI_THRESHOLD_DEFAULT,
            molar_mass_caco3: chemistry::M_CACO3,
            mg_per_meq_as_caco3: chemistry::MG_PER_MEQ_AS_CACO3,
            concentration_floor_mol: chemistry::CONCENTRATION_FLOOR_MOL_DEFAULT,
            ccpp_bracket_mg_l: chemistry::CCPP_BRACKET_MG_L_DEFAULT,
        }
    }
}

/// Chemical state of the water relative to calcite saturation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaturationCondition {
    Undersaturated,
    Saturated,
    Oversaturated,
}

impl SaturationCondition {
    /// Classify an LSI against a symmetric threshold band.
    /// Values on the band boundary count as Saturated.
    pub fn classify(lsi: f64, threshold: f64) -> Self {
        if lsi > threshold {
            SaturationCondition::Oversaturated
        } else if lsi < -threshold {
            SaturationCondition::Undersaturated
        } else {
            SaturationCondition::Saturated
        }
    }
}

impl fmt::Display for SaturationCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturationCondition::Undersaturated => write!(f, "Undersaturated"),
            SaturationCondition::Saturated => write!(f, "Saturated"),
            SaturationCondition::Oversaturated => write!(f, "Oversaturated"),
        }
    }
}

/// Free variable for the inverse (target-CCPP) solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetVariable {
    Ph,
    Calcium,
}

impl fmt::Display for TargetVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetVariable::Ph => write!(f, "pH"),
            TargetVariable::Calcium => write!(f, "calcium"),
        }
    }
}

/// Full evaluation result.
///
/// Fields:
/// - `lsi`: Langelier Saturation Index (dimensionless)
/// - `ccpp`: mg/L as CaCO3; positive = net precipitation, negative = net dissolution
/// - `saturation_ph`: pH at which the current calcium/alkalinity would be exactly saturated
/// - `saturation_condition`: classification of `lsi` against the calibrated band
/// - `equilibrium_ph` / `equilibrium_alk` / `equilibrium_ca`: state after the
///   CCPP amount has precipitated or dissolved (`alk`/`ca` in mg/L as CaCO3,
///   floored at zero for reporting)
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CalculationResult {
    pub lsi: f64,
    pub ccpp: f64,
    pub saturation_ph: f64,
    pub saturation_condition: SaturationCondition,
    pub equilibrium_ph: f64,
    pub equilibrium_alk: f64,
    pub equilibrium_ca: f64,
}
