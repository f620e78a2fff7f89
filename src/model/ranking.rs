//! Ranking metric
//!
//! Trained on better/worse translation pairs with a triplet margin loss;
//! scores come straight from the encoder embedding distances.

use rand::rngs::StdRng;
use rand::Rng;

use super::{
    check_batch_size, check_dropout, check_non_negative, check_positive, EpochStats, ModelError,
};
use crate::config::RankingConfig;
use crate::seed::SeedContext;

const MODEL_NAME: &str = "RankingMetric";

#[derive(Debug)]
pub struct RankingMetric {
    cfg: RankingConfig,
    epoch: usize,
    initial_loss: f32,
}

impl RankingMetric {
    pub fn new(cfg: &RankingConfig, seed: &SeedContext) -> Result<Self, ModelError> {
        check_positive(MODEL_NAME, "learning_rate", cfg.learning_rate)?;
        check_positive(MODEL_NAME, "encoder_learning_rate", cfg.encoder_learning_rate)?;
        check_non_negative(MODEL_NAME, "nr_frozen_epochs", cfg.nr_frozen_epochs)?;
        check_dropout(MODEL_NAME, cfg.dropout)?;
        check_batch_size(MODEL_NAME, cfg.batch_size)?;
        check_positive(MODEL_NAME, "margin", cfg.margin)?;
        let mut rng = seed.stream(MODEL_NAME);
        Ok(Self {
            cfg: cfg.clone(),
            epoch: 0,
            initial_loss: 1.0 + rng.random_range(0.0..0.1),
        })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.cfg
    }

    pub(crate) fn advance_epoch(&mut self, rng: &mut StdRng) -> EpochStats {
        // The triplet loss bottoms out near a margin-proportional floor
        // instead of zero.
        let floor = (self.cfg.margin * 0.05) as f32;
        let frozen_epochs = self.cfg.nr_frozen_epochs.ceil() as usize;
        let mut rate = (self.cfg.learning_rate * 1e3) as f32;
        if self.epoch < frozen_epochs {
            rate *= 0.5;
        }
        let train_loss = floor
            + self.initial_loss * (-rate * self.epoch as f32).exp()
            + rng.random_range(0.0..0.005);
        let val_loss = self
            .cfg
            .validation_data
            .as_ref()
            .map(|_| train_loss * 1.08 + rng.random_range(0.0..0.005));
        self.epoch += 1;
        EpochStats { train_loss, val_loss }
    }
}
