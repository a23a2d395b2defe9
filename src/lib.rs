pub mod adapters;
pub mod chemistry;
pub mod engine;
pub mod error;
pub mod models;

pub use crate::chemistry::{
    EquilibriumConstants, SpeciationFractions, carbonate_alphas, equilibrium_constants,
};
pub use crate::engine::calculator::{evaluate, solve_for_target};
pub use crate::error::{AppError, EngineError};
pub use crate::models::{
    CalculationResult, Calibration, SaturationCondition, TargetVariable, WaterParameters,
};
