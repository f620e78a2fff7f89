//! Unified metric
//!
//! Scores every configured combination of hypothesis, source and reference
//! segments with one shared estimator; training speed scales with how many
//! segment combinations each batch covers.

use rand::rngs::StdRng;
use rand::Rng;

use super::{
    check_activation, check_batch_size, check_dropout, check_hidden_sizes, check_non_negative,
    check_positive, EpochStats, ModelError, INPUT_SEGMENTS,
};
use crate::config::UniteConfig;
use crate::seed::SeedContext;

const MODEL_NAME: &str = "UniteMetric";

#[derive(Debug)]
pub struct UniteMetric {
    cfg: UniteConfig,
    epoch: usize,
    initial_loss: f32,
}

impl UniteMetric {
    pub fn new(cfg: &UniteConfig, seed: &SeedContext) -> Result<Self, ModelError> {
        check_positive(MODEL_NAME, "learning_rate", cfg.learning_rate)?;
        check_positive(MODEL_NAME, "encoder_learning_rate", cfg.encoder_learning_rate)?;
        check_non_negative(MODEL_NAME, "nr_frozen_epochs", cfg.nr_frozen_epochs)?;
        check_dropout(MODEL_NAME, cfg.dropout)?;
        check_batch_size(MODEL_NAME, cfg.batch_size)?;
        check_hidden_sizes(MODEL_NAME, &cfg.hidden_sizes)?;
        check_activation(MODEL_NAME, &cfg.activations)?;
        validate_segments(&cfg.input_segments)?;
        let mut rng = seed.stream(MODEL_NAME);
        Ok(Self {
            cfg: cfg.clone(),
            epoch: 0,
            initial_loss: 1.0 + rng.random_range(0.0..0.1),
        })
    }

    pub fn config(&self) -> &UniteConfig {
        &self.cfg
    }

    pub(crate) fn advance_epoch(&mut self, rng: &mut StdRng) -> EpochStats {
        // More segment combinations per batch means more supervision.
        let pace = self.cfg.input_segments.len() as f32 / INPUT_SEGMENTS.len() as f32;
        let frozen_epochs = self.cfg.nr_frozen_epochs.ceil() as usize;
        let mut rate = (self.cfg.learning_rate * 1e3) as f32 * pace;
        if self.epoch < frozen_epochs {
            rate *= 0.5;
        }
        let train_loss =
            self.initial_loss * (-rate * self.epoch as f32).exp() + rng.random_range(0.0..0.005);
        let val_loss = self
            .cfg
            .validation_data
            .as_ref()
            .map(|_| train_loss * 1.08 + rng.random_range(0.0..0.005));
        self.epoch += 1;
        EpochStats { train_loss, val_loss }
    }
}

fn validate_segments(segments: &[String]) -> Result<(), ModelError> {
    if segments.is_empty() {
        return Err(ModelError::InvalidArgument {
            model: MODEL_NAME,
            field: "input_segments",
            reason: "[] (must name at least one segment)".to_string(),
        });
    }
    for segment in segments {
        if !INPUT_SEGMENTS.contains(&segment.as_str()) {
            return Err(ModelError::InvalidArgument {
                model: MODEL_NAME,
                field: "input_segments",
                reason: format!(
                    "'{segment}' (must be one of: {})",
                    INPUT_SEGMENTS.join(", ")
                ),
            });
        }
    }
    Ok(())
}
