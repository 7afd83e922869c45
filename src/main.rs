use anyhow::Result;
use clap::Parser;
use tracing::error;

use racebar::app::{print_race_summary, run_race};
use racebar::utils::{setup_logging, validate_args};
use racebar::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match run_race(&args) {
        Ok(summary) => {
            print_race_summary(&summary, &args);
            Ok(())
        }
        Err(e) => {
            error!(action = "failed", component = "racebar", "Error: {e:#}");
            std::process::exit(1);
        }
    }
}
