//! Crate-level error type
//!
//! Every component defines its own `thiserror` enum at its seam; this module
//! aggregates them so library entry points can return a single `Result`.

use crate::config::ConfigError;
use crate::model::ModelError;
use crate::train::callback::CallbackError;
use crate::train::DriverError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Callback(#[from] CallbackError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("failed to render audit output: {0}")]
    Audit(#[from] serde_json::Error),
}
