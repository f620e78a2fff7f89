//! Resolved configuration tree
//!
//! Defines the complete training configuration a run is launched from.
//! Organized into submodules:
//! - `metrics` - base model options and the five metric-variant schemas
//! - `callbacks` - early stopping and checkpoint options
//! - `trainer` - the driver option mapping
//!
//! Every struct rejects unknown fields at parse time, so a mistyped key
//! fails during resolution instead of being silently dropped.

pub mod callbacks;
pub mod metrics;
pub mod trainer;

pub use callbacks::{CheckpointConfig, EarlyStoppingConfig, MonitorMode};
pub use metrics::{
    CspecConfig, ModelConfig, RankingConfig, ReferencelessConfig, RegressionConfig, UniteConfig,
};
pub use trainer::DriverOptions;

use serde::{Deserialize, Serialize};

use crate::seed::DEFAULT_SEED;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Wrapper for a namespace whose options live under `init_args`, matching
/// the `<namespace>.init_args.*` addressing of the CLI surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Namespace<T> {
    #[serde(default)]
    pub init_args: T,
}

/// Complete resolved configuration for one training run.
///
/// Constructed once per invocation by merging the optional configuration
/// file with CLI overrides; immutable afterwards. At most the variant
/// namespaces differ between runs of the same job family - exactly one of
/// them must be present for a launch to proceed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingSpec {
    /// Seed for the run; every RNG stream derives from it.
    #[serde(default = "default_seed")]
    pub seed_everything: u64,

    /// Options shared by the abstract metric-model base.
    #[serde(default)]
    pub model: ModelConfig,

    /// Regression metric variant (hypothesis + source + reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression_metric: Option<Namespace<RegressionConfig>>,

    /// Regression variant scoring without a reference translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenceless_regression_metric: Option<Namespace<ReferencelessConfig>>,

    /// Ranking metric variant trained with a triplet margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_metric: Option<Namespace<RankingConfig>>,

    /// Unified metric variant over configurable input segment combinations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unite_metric: Option<Namespace<UniteConfig>>,

    /// Contrastive span-prediction metric variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cspec_metric: Option<Namespace<CspecConfig>>,

    /// Early stopping callback options.
    #[serde(default)]
    pub early_stopping: Namespace<EarlyStoppingConfig>,

    /// Checkpoint callback options.
    #[serde(default)]
    pub model_checkpoint: Namespace<CheckpointConfig>,

    /// Driver options, opaque at resolution time. The driver constructor
    /// validates them; the resolver only routes keys here.
    #[serde(default)]
    pub trainer: Namespace<DriverOptions>,
}
