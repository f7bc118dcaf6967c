use crate::cli::EvalArgs;
use crate::config::PartialVdwConfig;
use crate::error::Result;
use crate::input;
use crate::output;
use halvdw::workflows::evaluate::{self, Evaluation};
use std::io::Write;
use tracing::info;

pub fn run(args: EvalArgs) -> Result<()> {
    let stdout = std::io::stdout();
    execute(&args, &mut stdout.lock()).map(|_| ())
}

fn execute<W: Write>(args: &EvalArgs, out: &mut W) -> Result<Evaluation> {
    let partial = match &args.config {
        Some(path) => PartialVdwConfig::from_file(path)?,
        None => PartialVdwConfig::default(),
    };
    let config = partial.merge_with_cli(args)?;
    let system = input::load_system(&args.system)?;

    let evaluation = evaluate::run(&config, &system)?;
    info!(
        "Net force magnitude: {:.3e} kcal/(mol·Å).",
        evaluation.net_force().norm()
    );

    output::print_summary(&evaluation, out)?;
    if let Some(path) = &args.output {
        output::write_forces_csv(&evaluation, path)?;
    }
    Ok(evaluation)
}
