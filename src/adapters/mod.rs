#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{Args, parse_inputs, parse_solve_request, print_result, print_solved};
    use crate::engine::calculator::{evaluate, solve_for_target};

    let args = Args::parse();
    let (params, cal) = parse_inputs(&args)?;

    match parse_solve_request(&args)? {
        Some((target_ccpp, variable)) => {
            let value = solve_for_target(&params, &cal, target_ccpp, variable)?;
            print_solved(variable, value, &args)?;
        }
        None => {
            let out = evaluate(&params, &cal)?;
            print_result(&out, &args)?;
        }
    }

    Ok(())
}
