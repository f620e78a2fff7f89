//! Metric model variants
//!
//! The five trainable variants form a closed set. Selection scans a fixed
//! priority order and picks the first variant whose configuration namespace
//! is present; extra configured namespaces are ignored (a warning is emitted
//! so authoring mistakes stay visible, but the first-match outcome is
//! unchanged).

mod cspec;
mod ranking;
mod referenceless;
mod regression;
mod unite;

pub use cspec::CspecMetric;
pub use ranking::RankingMetric;
pub use referenceless::ReferencelessRegression;
pub use regression::RegressionMetric;
pub use unite::UniteMetric;

use rand::rngs::StdRng;
use serde_json::Value;
use thiserror::Error;

use crate::config::TrainingSpec;
use crate::seed::SeedContext;
use crate::warnings::{self, WarningCategory};

/// Errors raised while selecting or constructing a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model configurations missing")]
    NoModelConfigured,

    #[error("invalid {field} for {model}: {reason}")]
    InvalidArgument {
        model: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Activations the estimator heads accept.
pub const ACTIVATIONS: &[&str] = &["Tanh", "ReLU", "GELU", "Sigmoid"];

/// Segment names the unified metric can combine.
pub const INPUT_SEGMENTS: &[&str] = &["hyp", "src", "ref"];

/// The closed set of model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    Regression,
    ReferencelessRegression,
    Ranking,
    Unite,
    Cspec,
}

impl ModelVariant {
    /// Selection priority. When several namespaces are configured, the
    /// earliest entry here wins.
    pub const PRIORITY: [ModelVariant; 5] = [
        ModelVariant::Regression,
        ModelVariant::ReferencelessRegression,
        ModelVariant::Ranking,
        ModelVariant::Unite,
        ModelVariant::Cspec,
    ];

    /// Configuration namespace this variant is addressed by.
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Regression => "regression_metric",
            Self::ReferencelessRegression => "referenceless_regression_metric",
            Self::Ranking => "ranking_metric",
            Self::Unite => "unite_metric",
            Self::Cspec => "cspec_metric",
        }
    }

    /// Name of the concrete model type.
    pub fn model_name(self) -> &'static str {
        match self {
            Self::Regression => "RegressionMetric",
            Self::ReferencelessRegression => "ReferencelessRegression",
            Self::Ranking => "RankingMetric",
            Self::Unite => "UniteMetric",
            Self::Cspec => "CspecMetric",
        }
    }

    fn is_configured(self, spec: &TrainingSpec) -> bool {
        match self {
            Self::Regression => spec.regression_metric.is_some(),
            Self::ReferencelessRegression => spec.referenceless_regression_metric.is_some(),
            Self::Ranking => spec.ranking_metric.is_some(),
            Self::Unite => spec.unite_metric.is_some(),
            Self::Cspec => spec.cspec_metric.is_some(),
        }
    }

    /// All configured variants, in priority order.
    pub fn configured(spec: &TrainingSpec) -> Vec<ModelVariant> {
        Self::PRIORITY.into_iter().filter(|v| v.is_configured(spec)).collect()
    }

    /// Pick the variant this run trains.
    ///
    /// A single lookup over the priority list. Fails before any callback or
    /// driver exists when no variant namespace is present.
    pub fn select(spec: &TrainingSpec) -> Result<ModelVariant, ModelError> {
        let configured = Self::configured(spec);
        match configured.split_first() {
            None => Err(ModelError::NoModelConfigured),
            Some((&first, rest)) => {
                if !rest.is_empty() {
                    let ignored: Vec<&str> = rest.iter().map(|v| v.config_key()).collect();
                    warnings::emit(
                        WarningCategory::ExtraVariantConfigs,
                        &format!(
                            "multiple variant configurations present; using {} and ignoring {}",
                            first.config_key(),
                            ignored.join(", ")
                        ),
                    );
                }
                Ok(first)
            }
        }
    }

    /// Resolved constructor arguments of this variant, for audit output.
    pub fn init_args(self, spec: &TrainingSpec) -> Result<Value, ModelError> {
        let value = match self {
            Self::Regression => {
                spec.regression_metric.as_ref().map(|ns| serde_json::to_value(&ns.init_args))
            }
            Self::ReferencelessRegression => spec
                .referenceless_regression_metric
                .as_ref()
                .map(|ns| serde_json::to_value(&ns.init_args)),
            Self::Ranking => {
                spec.ranking_metric.as_ref().map(|ns| serde_json::to_value(&ns.init_args))
            }
            Self::Unite => spec.unite_metric.as_ref().map(|ns| serde_json::to_value(&ns.init_args)),
            Self::Cspec => spec.cspec_metric.as_ref().map(|ns| serde_json::to_value(&ns.init_args)),
        };
        match value {
            None => Err(ModelError::NoModelConfigured),
            // Plain derived structs serialize infallibly.
            Some(result) => Ok(result.unwrap_or(Value::Null)),
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_name())
    }
}

/// Losses produced by one training epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub train_loss: f32,
    /// Present only when validation data is configured.
    pub val_loss: Option<f32>,
}

/// One constructed metric model.
pub enum MetricModel {
    Regression(RegressionMetric),
    ReferencelessRegression(ReferencelessRegression),
    Ranking(RankingMetric),
    Unite(UniteMetric),
    Cspec(CspecMetric),
}

impl MetricModel {
    /// Construct the selected variant from its configuration namespace.
    pub fn build(
        variant: ModelVariant,
        spec: &TrainingSpec,
        seed: &SeedContext,
    ) -> Result<MetricModel, ModelError> {
        match variant {
            ModelVariant::Regression => {
                let ns = spec.regression_metric.as_ref().ok_or(ModelError::NoModelConfigured)?;
                Ok(Self::Regression(RegressionMetric::new(&ns.init_args, seed)?))
            }
            ModelVariant::ReferencelessRegression => {
                let ns = spec
                    .referenceless_regression_metric
                    .as_ref()
                    .ok_or(ModelError::NoModelConfigured)?;
                Ok(Self::ReferencelessRegression(ReferencelessRegression::new(
                    &ns.init_args,
                    seed,
                )?))
            }
            ModelVariant::Ranking => {
                let ns = spec.ranking_metric.as_ref().ok_or(ModelError::NoModelConfigured)?;
                Ok(Self::Ranking(RankingMetric::new(&ns.init_args, seed)?))
            }
            ModelVariant::Unite => {
                let ns = spec.unite_metric.as_ref().ok_or(ModelError::NoModelConfigured)?;
                Ok(Self::Unite(UniteMetric::new(&ns.init_args, seed)?))
            }
            ModelVariant::Cspec => {
                let ns = spec.cspec_metric.as_ref().ok_or(ModelError::NoModelConfigured)?;
                Ok(Self::Cspec(CspecMetric::new(&ns.init_args, seed)?))
            }
        }
    }

    pub fn variant(&self) -> ModelVariant {
        match self {
            Self::Regression(_) => ModelVariant::Regression,
            Self::ReferencelessRegression(_) => ModelVariant::ReferencelessRegression,
            Self::Ranking(_) => ModelVariant::Ranking,
            Self::Unite(_) => ModelVariant::Unite,
            Self::Cspec(_) => ModelVariant::Cspec,
        }
    }

    /// Learning rate of the trainable head, reported to callbacks.
    pub fn learning_rate(&self) -> f64 {
        match self {
            Self::Regression(m) => m.config().learning_rate,
            Self::ReferencelessRegression(m) => m.config().learning_rate,
            Self::Ranking(m) => m.config().learning_rate,
            Self::Unite(m) => m.config().learning_rate,
            Self::Cspec(m) => m.config().learning_rate,
        }
    }

    /// Run one training epoch and report its losses.
    pub fn advance_epoch(&mut self, rng: &mut StdRng) -> EpochStats {
        match self {
            Self::Regression(m) => m.advance_epoch(rng),
            Self::ReferencelessRegression(m) => m.advance_epoch(rng),
            Self::Ranking(m) => m.advance_epoch(rng),
            Self::Unite(m) => m.advance_epoch(rng),
            Self::Cspec(m) => m.advance_epoch(rng),
        }
    }
}

// Shared constructor validation helpers. Every variant funnels its range
// checks through these so rejection messages stay uniform.

pub(crate) fn check_positive(
    model: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidArgument {
            model,
            field,
            reason: format!("{value} (must be finite and > 0)"),
        })
    }
}

pub(crate) fn check_non_negative(
    model: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidArgument {
            model,
            field,
            reason: format!("{value} (must be finite and >= 0)"),
        })
    }
}

pub(crate) fn check_dropout(model: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::InvalidArgument {
            model,
            field: "dropout",
            reason: format!("{value} (must be in [0.0, 1.0))"),
        })
    }
}

pub(crate) fn check_batch_size(model: &'static str, value: usize) -> Result<(), ModelError> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ModelError::InvalidArgument {
            model,
            field: "batch_size",
            reason: "0 (must be >= 1)".to_string(),
        })
    }
}

pub(crate) fn check_activation(model: &'static str, value: &str) -> Result<(), ModelError> {
    if ACTIVATIONS.contains(&value) {
        Ok(())
    } else {
        Err(ModelError::InvalidArgument {
            model,
            field: "activations",
            reason: format!("'{value}' (must be one of: {})", ACTIVATIONS.join(", ")),
        })
    }
}

pub(crate) fn check_hidden_sizes(model: &'static str, sizes: &[usize]) -> Result<(), ModelError> {
    if sizes.is_empty() || sizes.contains(&0) {
        Err(ModelError::InvalidArgument {
            model,
            field: "hidden_sizes",
            reason: format!("{sizes:?} (must be non-empty with positive widths)"),
        })
    } else {
        Ok(())
    }
}
