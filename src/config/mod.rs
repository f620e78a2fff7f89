//! Configuration: CLI surface, schema, and resolution

mod cli;
mod resolve;
pub mod schema;

pub use cli::{parse_args, Cli, Command, InfoArgs, OutputFormat, TrainArgs, ValidateArgs};
pub use resolve::{resolve, ConfigError};
pub use schema::{
    CheckpointConfig, CspecConfig, DriverOptions, EarlyStoppingConfig, ModelConfig, MonitorMode,
    Namespace, RankingConfig, ReferencelessConfig, RegressionConfig, TrainingSpec, UniteConfig,
};
pub use schema::trainer::CALLBACKS_KEY;
