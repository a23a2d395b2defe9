use thiserror::Error;

use crate::models::TargetVariable;

/// Errors produced by the equilibrium engine itself.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value}")]
    NonNegativeRequired { name: &'static str, value: f64 },

    #[error("{name} = {value} outside supported domain [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("target CCPP {target} mg/L not reachable by varying {variable} within [{lo}, {hi}]")]
    TargetUnreachable {
        target: f64,
        variable: TargetVariable,
        lo: f64,
        hi: f64,
    },
}

/// Application-level errors for the CLI adapter.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[cfg(feature = "cli")]
    #[error("Error reading from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Error reading file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON for --params-json: {source}")]
    ParseParamsJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON for --calibration-json: {source}")]
    ParseCalibrationJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON in input document: {source}")]
    ParseCmdInputJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Could not serialize output to JSON: {source}")]
    SerializeOutput {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Missing input data: provide --input or --params-json")]
    MissingInputData,

    #[cfg(feature = "cli")]
    #[error("--target-ccpp requires --solve-for <ph|calcium>")]
    MissingSolveVariable,

    #[cfg(feature = "cli")]
    #[error("Unknown solve variable '{0}': expected 'ph' or 'calcium'")]
    UnknownSolveVariable(String),

    #[error("Unexpected error: {0}")]
    Other(String),
}
