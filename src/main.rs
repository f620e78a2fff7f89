//! Metrica CLI
//!
//! Training launcher for translation quality metric models.
//!
//! # Usage
//!
//! ```bash
//! # Train from a config file
//! metrica train --cfg configs/regression_metric.yaml
//!
//! # Train with dotted overrides
//! metrica train --cfg base.yaml ranking_metric.init_args.margin=0.5
//!
//! # Validate a config without training
//! metrica validate --cfg base.yaml --detailed
//!
//! # Show the resolved configuration
//! metrica info --cfg base.yaml --format yaml
//! ```

use clap::Parser;
use metrica::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
