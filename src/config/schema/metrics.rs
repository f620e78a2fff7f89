//! Metric model schemas
//!
//! One explicit, validated schema per variant: named typed fields with
//! defaults, unknown fields rejected at parse time. Range constraints are
//! enforced by the variant constructors in `crate::model`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_encoder_model() -> String {
    "XLM-RoBERTa".to_string()
}

fn default_pretrained_model() -> String {
    "xlm-roberta-base".to_string()
}

fn default_learning_rate() -> f64 {
    3e-5
}

fn default_encoder_learning_rate() -> f64 {
    1e-5
}

fn default_nr_frozen_epochs() -> f64 {
    0.3
}

fn default_dropout() -> f64 {
    0.1
}

fn default_batch_size() -> usize {
    4
}

fn default_hidden_sizes() -> Vec<usize> {
    vec![2304, 768]
}

fn default_activation() -> String {
    "Tanh".to_string()
}

fn default_margin() -> f64 {
    1.0
}

fn default_input_segments() -> Vec<String> {
    vec!["hyp".to_string(), "src".to_string(), "ref".to_string()]
}

fn default_temperature() -> f64 {
    0.1
}

/// Options of the abstract metric-model base (`model.*` on the CLI).
///
/// Parsed and audited for every run; the selected variant constructs from
/// its own `init_args`, so these values never leak into another namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Encoder architecture family.
    pub encoder_model: String,
    /// Pretrained checkpoint the encoder starts from.
    pub pretrained_model: String,
    /// Learning rate for the estimator head.
    pub learning_rate: f64,
    /// Learning rate for the encoder once unfrozen.
    pub encoder_learning_rate: f64,
    /// Fraction of epochs the encoder stays frozen.
    pub nr_frozen_epochs: f64,
    /// Keep the embedding layer frozen for the whole run.
    pub keep_embeddings_frozen: bool,
    /// Dropout applied to the estimator head.
    pub dropout: f64,
    /// Training batch size.
    pub batch_size: usize,
    /// Training data path.
    pub train_data: Option<PathBuf>,
    /// Validation data path.
    pub validation_data: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            encoder_model: default_encoder_model(),
            pretrained_model: default_pretrained_model(),
            learning_rate: default_learning_rate(),
            encoder_learning_rate: default_encoder_learning_rate(),
            nr_frozen_epochs: default_nr_frozen_epochs(),
            keep_embeddings_frozen: false,
            dropout: default_dropout(),
            batch_size: default_batch_size(),
            train_data: None,
            validation_data: None,
        }
    }
}

/// Constructor arguments for the regression metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegressionConfig {
    /// Encoder architecture family.
    pub encoder_model: String,
    /// Pretrained checkpoint the encoder starts from.
    pub pretrained_model: String,
    /// Learning rate for the estimator head.
    pub learning_rate: f64,
    /// Learning rate for the encoder once unfrozen.
    pub encoder_learning_rate: f64,
    /// Fraction of epochs the encoder stays frozen.
    pub nr_frozen_epochs: f64,
    /// Keep the embedding layer frozen for the whole run.
    pub keep_embeddings_frozen: bool,
    /// Dropout applied to the estimator head.
    pub dropout: f64,
    /// Training batch size.
    pub batch_size: usize,
    /// Training data path.
    pub train_data: Option<PathBuf>,
    /// Validation data path.
    pub validation_data: Option<PathBuf>,
    /// Widths of the estimator feed-forward layers.
    pub hidden_sizes: Vec<usize>,
    /// Activation used between estimator layers.
    pub activations: String,
    /// Optional activation on the final score.
    pub final_activation: Option<String>,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            encoder_model: default_encoder_model(),
            pretrained_model: default_pretrained_model(),
            learning_rate: default_learning_rate(),
            encoder_learning_rate: default_encoder_learning_rate(),
            nr_frozen_epochs: default_nr_frozen_epochs(),
            keep_embeddings_frozen: false,
            dropout: default_dropout(),
            batch_size: default_batch_size(),
            train_data: None,
            validation_data: None,
            hidden_sizes: default_hidden_sizes(),
            activations: default_activation(),
            final_activation: None,
        }
    }
}

/// The referenceless variant scores hypothesis + source only but takes the
/// same constructor arguments as the regression metric.
pub type ReferencelessConfig = RegressionConfig;

/// Constructor arguments for the ranking metric.
///
/// Trained on better/worse translation pairs; scores come straight from the
/// encoder embeddings, so there is no estimator head to size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    /// Encoder architecture family.
    pub encoder_model: String,
    /// Pretrained checkpoint the encoder starts from.
    pub pretrained_model: String,
    /// Learning rate for the scoring projection.
    pub learning_rate: f64,
    /// Learning rate for the encoder once unfrozen.
    pub encoder_learning_rate: f64,
    /// Fraction of epochs the encoder stays frozen.
    pub nr_frozen_epochs: f64,
    /// Keep the embedding layer frozen for the whole run.
    pub keep_embeddings_frozen: bool,
    /// Dropout applied before scoring.
    pub dropout: f64,
    /// Training batch size.
    pub batch_size: usize,
    /// Training data path.
    pub train_data: Option<PathBuf>,
    /// Validation data path.
    pub validation_data: Option<PathBuf>,
    /// Margin of the triplet ranking loss.
    pub margin: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            encoder_model: default_encoder_model(),
            pretrained_model: default_pretrained_model(),
            learning_rate: default_learning_rate(),
            encoder_learning_rate: default_encoder_learning_rate(),
            nr_frozen_epochs: default_nr_frozen_epochs(),
            keep_embeddings_frozen: false,
            dropout: default_dropout(),
            batch_size: default_batch_size(),
            train_data: None,
            validation_data: None,
            margin: default_margin(),
        }
    }
}

/// Constructor arguments for the unified metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniteConfig {
    /// Encoder architecture family.
    pub encoder_model: String,
    /// Pretrained checkpoint the encoder starts from.
    pub pretrained_model: String,
    /// Learning rate for the estimator head.
    pub learning_rate: f64,
    /// Learning rate for the encoder once unfrozen.
    pub encoder_learning_rate: f64,
    /// Fraction of epochs the encoder stays frozen.
    pub nr_frozen_epochs: f64,
    /// Keep the embedding layer frozen for the whole run.
    pub keep_embeddings_frozen: bool,
    /// Dropout applied to the estimator head.
    pub dropout: f64,
    /// Training batch size.
    pub batch_size: usize,
    /// Training data path.
    pub train_data: Option<PathBuf>,
    /// Validation data path.
    pub validation_data: Option<PathBuf>,
    /// Widths of the estimator feed-forward layers.
    pub hidden_sizes: Vec<usize>,
    /// Activation used between estimator layers.
    pub activations: String,
    /// Input segment combinations scored each step
    /// (subsets of `hyp`, `src`, `ref`).
    pub input_segments: Vec<String>,
}

impl Default for UniteConfig {
    fn default() -> Self {
        Self {
            encoder_model: default_encoder_model(),
            pretrained_model: default_pretrained_model(),
            learning_rate: default_learning_rate(),
            encoder_learning_rate: default_encoder_learning_rate(),
            nr_frozen_epochs: default_nr_frozen_epochs(),
            keep_embeddings_frozen: false,
            dropout: default_dropout(),
            batch_size: default_batch_size(),
            train_data: None,
            validation_data: None,
            hidden_sizes: default_hidden_sizes(),
            activations: default_activation(),
            input_segments: default_input_segments(),
        }
    }
}

/// Constructor arguments for the contrastive span-prediction metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CspecConfig {
    /// Encoder architecture family.
    pub encoder_model: String,
    /// Pretrained checkpoint the encoder starts from.
    pub pretrained_model: String,
    /// Learning rate for the contrastive head.
    pub learning_rate: f64,
    /// Learning rate for the encoder once unfrozen.
    pub encoder_learning_rate: f64,
    /// Fraction of epochs the encoder stays frozen.
    pub nr_frozen_epochs: f64,
    /// Keep the embedding layer frozen for the whole run.
    pub keep_embeddings_frozen: bool,
    /// Dropout applied to the contrastive head.
    pub dropout: f64,
    /// Training batch size.
    pub batch_size: usize,
    /// Training data path.
    pub train_data: Option<PathBuf>,
    /// Validation data path.
    pub validation_data: Option<PathBuf>,
    /// Temperature of the contrastive loss.
    pub temperature: f64,
}

impl Default for CspecConfig {
    fn default() -> Self {
        Self {
            encoder_model: default_encoder_model(),
            pretrained_model: default_pretrained_model(),
            learning_rate: default_learning_rate(),
            encoder_learning_rate: default_encoder_learning_rate(),
            nr_frozen_epochs: default_nr_frozen_epochs(),
            keep_embeddings_frozen: false,
            dropout: default_dropout(),
            batch_size: default_batch_size(),
            train_data: None,
            validation_data: None,
            temperature: default_temperature(),
        }
    }
}
