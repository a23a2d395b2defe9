use clap::Parser;
use std::fs;
use std::io::{self, Read};

use crate::error::AppError;
use crate::models::{Calibration, CalculationResult, TargetVariable, WaterParameters};

#[derive(Parser, Debug)]
#[command(author, version, about = "Carbonate equilibrium calculator (LSI/CCPP) — optional JSON output", long_about = None)]
pub struct Args {
    #[arg(long)]
    json: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with parameters and optional calibration; '-' reads from stdin"
    )]
    input: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON for water parameters (overrides --input)"
    )]
    params_json: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON for calibration constants (optional, supplements --params-json)"
    )]
    calibration_json: Option<String>,
    #[arg(
        long,
        value_name = "MG_L",
        help = "Target CCPP (mg/L as CaCO3) for the inverse solver"
    )]
    target_ccpp: Option<f64>,
    #[arg(
        long,
        value_name = "VAR",
        help = "Free variable for the inverse solver: 'ph' or 'calcium'"
    )]
    solve_for: Option<String>,
}

fn parse_inline_inputs(
    params_json: &str,
    calibration_json: Option<&String>,
) -> Result<(WaterParameters, Calibration), AppError> {
    let params: WaterParameters =
        serde_json::from_str(params_json).map_err(|source| AppError::ParseParamsJson { source })?;

    let calibration = match calibration_json {
        Some(s) => serde_json::from_str::<Calibration>(s)
            .map_err(|source| AppError::ParseCalibrationJson { source })?,
        None => Calibration::default(),
    };

    Ok((params, calibration))
}

fn parse_cmd_input_doc(doc: &str) -> Result<(WaterParameters, Calibration), AppError> {
    let parsed: CmdInput =
        serde_json::from_str(doc).map_err(|source| AppError::ParseCmdInputJson { source })?;
    Ok((parsed.parameters, parsed.calibration.unwrap_or_default()))
}

pub fn parse_inputs(args: &Args) -> Result<(WaterParameters, Calibration), AppError> {
    match (&args.params_json, &args.input) {
        (Some(params_json), _) => parse_inline_inputs(params_json, args.calibration_json.as_ref()),
        (None, Some(path)) if path == "-" => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|source| AppError::ReadStdin { source })?;
            parse_cmd_input_doc(&s)
        }
        (None, Some(path)) => {
            let s = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
                path: path.clone(),
                source,
            })?;
            parse_cmd_input_doc(&s)
        }
        (None, None) => Err(AppError::MissingInputData),
    }
}

/// Interpret the inverse-solver flags. `--target-ccpp` requires
/// `--solve-for`; a lone `--solve-for` is ignored.
pub fn parse_solve_request(args: &Args) -> Result<Option<(f64, TargetVariable)>, AppError> {
    match (args.target_ccpp, args.solve_for.as_deref()) {
        (None, _) => Ok(None),
        (Some(_), None) => Err(AppError::MissingSolveVariable),
        (Some(t), Some("ph")) => Ok(Some((t, TargetVariable::Ph))),
        (Some(t), Some("calcium")) => Ok(Some((t, TargetVariable::Calcium))),
        (Some(_), Some(other)) => Err(AppError::UnknownSolveVariable(other.to_string())),
    }
}

#[derive(serde::Deserialize)]
struct CmdInput {
    parameters: WaterParameters,
    #[serde(default)]
    calibration: Option<Calibration>,
}

pub fn print_result(out: &CalculationResult, args: &Args) -> Result<(), AppError> {
    if args.json {
        let s = serde_json::to_string_pretty(&out)
            .map_err(|source| AppError::SerializeOutput { source })?;
        println!("{}", s);
    } else {
        println!("LSI: {:.4}", out.lsi);
        println!("CCPP: {:.4} mg/L as CaCO3", out.ccpp);
        println!("Saturation pH: {:.4}", out.saturation_ph);
        println!("Condition: {}", out.saturation_condition);
        println!("Equilibrium pH: {:.4}", out.equilibrium_ph);
        println!("Equilibrium alkalinity: {:.4} mg/L as CaCO3", out.equilibrium_alk);
        println!("Equilibrium calcium: {:.4} mg/L as CaCO3", out.equilibrium_ca);
    }

    Ok(())
}

pub fn print_solved(variable: TargetVariable, value: f64, args: &Args) -> Result<(), AppError> {
    if args.json {
        let doc = serde_json::json!({ "variable": variable, "value": value });
        let s = serde_json::to_string_pretty(&doc)
            .map_err(|source| AppError::SerializeOutput { source })?;
        println!("{}", s);
    } else {
        println!("Solved {}: {:.4}", variable, value);
    }

    Ok(())
}
