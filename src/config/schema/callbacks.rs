//! Callback configuration schemas

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Direction in which a monitored metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorMode {
    /// Lower is better (losses).
    #[default]
    Min,
    /// Higher is better (correlations).
    Max,
}

fn default_monitor() -> String {
    "val_loss".to_string()
}

fn default_patience() -> usize {
    3
}

fn default_dirpath() -> PathBuf {
    PathBuf::from("checkpoints")
}

fn default_save_top_k() -> usize {
    1
}

/// Early stopping options (`early_stopping.init_args.*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EarlyStoppingConfig {
    /// Metric watched for improvement.
    pub monitor: String,
    /// Epochs without improvement before stopping.
    pub patience: usize,
    /// Minimum change that counts as an improvement.
    pub min_delta: f64,
    /// Improvement direction of the monitored metric.
    pub mode: MonitorMode,
}

impl Default for EarlyStoppingConfig {
    fn default() -> Self {
        Self {
            monitor: default_monitor(),
            patience: default_patience(),
            min_delta: 0.0,
            mode: MonitorMode::Min,
        }
    }
}

/// Checkpoint options (`model_checkpoint.init_args.*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckpointConfig {
    /// Directory checkpoints are written to.
    pub dirpath: PathBuf,
    /// Metric deciding which checkpoints are kept.
    pub monitor: String,
    /// Improvement direction of the monitored metric.
    pub mode: MonitorMode,
    /// How many best checkpoints to retain; 0 disables saving.
    pub save_top_k: usize,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            dirpath: default_dirpath(),
            monitor: default_monitor(),
            mode: MonitorMode::Min,
            save_top_k: default_save_top_k(),
        }
    }
}
