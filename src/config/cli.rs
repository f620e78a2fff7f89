//! CLI argument types

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::resolve::{self, ConfigError};
use super::schema::TrainingSpec;

/// Metrica: training launcher for translation quality metric models
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "metrica")]
#[command(version)]
#[command(about = "Launch training for one of the configured quality-metric model variants")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train a metric model from configuration
    Train(TrainArgs),

    /// Resolve and validate a configuration without training
    Validate(ValidateArgs),

    /// Display the resolved configuration
    Info(InfoArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Base configuration file merged before CLI overrides
    #[arg(long = "cfg", value_name = "PATH")]
    pub cfg: Option<PathBuf>,

    /// Training seed
    #[arg(long = "seed_everything", value_name = "SEED")]
    pub seed_everything: Option<u64>,

    /// Dotted key=value overrides, e.g. ranking_metric.init_args.margin=0.5
    #[arg(value_name = "KEY=VALUE", trailing_var_arg = true, allow_hyphen_values = true)]
    pub overrides: Vec<String>,
}

impl TrainArgs {
    /// Resolve the full configuration for this invocation.
    ///
    /// The `--seed_everything` flag is translated into an override applied
    /// before the positional ones, so an explicit dotted override can still
    /// win - the usual later-wins rule.
    pub fn resolve(&self) -> Result<TrainingSpec, ConfigError> {
        let mut overrides = Vec::with_capacity(self.overrides.len() + 1);
        if let Some(seed) = self.seed_everything {
            overrides.push(format!("seed_everything={seed}"));
        }
        overrides.extend(self.overrides.iter().cloned());
        resolve::resolve(self.cfg.as_deref(), &overrides)
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Base configuration file merged before CLI overrides
    #[arg(long = "cfg", value_name = "PATH")]
    pub cfg: Option<PathBuf>,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,

    /// Dotted key=value overrides
    #[arg(value_name = "KEY=VALUE", trailing_var_arg = true, allow_hyphen_values = true)]
    pub overrides: Vec<String>,
}

impl ValidateArgs {
    pub fn resolve(&self) -> Result<TrainingSpec, ConfigError> {
        resolve::resolve(self.cfg.as_deref(), &self.overrides)
    }
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Base configuration file merged before CLI overrides
    #[arg(long = "cfg", value_name = "PATH")]
    pub cfg: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Dotted key=value overrides
    #[arg(value_name = "KEY=VALUE", trailing_var_arg = true, allow_hyphen_values = true)]
    pub overrides: Vec<String>,
}

impl InfoArgs {
    pub fn resolve(&self) -> Result<TrainingSpec, ConfigError> {
        resolve::resolve(self.cfg.as_deref(), &self.overrides)
    }
}

/// Output format for the info command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
