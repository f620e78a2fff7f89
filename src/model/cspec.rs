//! Contrastive span-prediction metric

use rand::rngs::StdRng;
use rand::Rng;

use super::{
    check_batch_size, check_dropout, check_non_negative, check_positive, EpochStats, ModelError,
};
use crate::config::CspecConfig;
use crate::seed::SeedContext;

const MODEL_NAME: &str = "CspecMetric";

#[derive(Debug)]
pub struct CspecMetric {
    cfg: CspecConfig,
    epoch: usize,
    initial_loss: f32,
}

impl CspecMetric {
    pub fn new(cfg: &CspecConfig, seed: &SeedContext) -> Result<Self, ModelError> {
        check_positive(MODEL_NAME, "learning_rate", cfg.learning_rate)?;
        check_positive(MODEL_NAME, "encoder_learning_rate", cfg.encoder_learning_rate)?;
        check_non_negative(MODEL_NAME, "nr_frozen_epochs", cfg.nr_frozen_epochs)?;
        check_dropout(MODEL_NAME, cfg.dropout)?;
        check_batch_size(MODEL_NAME, cfg.batch_size)?;
        check_positive(MODEL_NAME, "temperature", cfg.temperature)?;
        let mut rng = seed.stream(MODEL_NAME);
        Ok(Self {
            cfg: cfg.clone(),
            epoch: 0,
            initial_loss: 1.2 + rng.random_range(0.0..0.1),
        })
    }

    pub fn config(&self) -> &CspecConfig {
        &self.cfg
    }

    pub(crate) fn advance_epoch(&mut self, rng: &mut StdRng) -> EpochStats {
        // Lower contrastive temperature sharpens the objective and speeds
        // up early descent.
        let sharpness = (1.0 + 1.0 / self.cfg.temperature).ln() as f32;
        let frozen_epochs = self.cfg.nr_frozen_epochs.ceil() as usize;
        let mut rate = (self.cfg.learning_rate * 1e3) as f32 * sharpness;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_accepts_defaults() {
        assert!(CspecMetric::new(&CspecConfig::default(), &SeedContext::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_temperature() {
        let cfg = CspecConfig { temperature: 0.0, ..Default::default() };
        let err = CspecMetric::new(&cfg, &SeedContext::default()).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_lower_temperature_descends_faster() {
        let seed = SeedContext::new(6);
        let sharp = CspecConfig { temperature: 0.05, ..Default::default() };
        let soft = CspecConfig { temperature: 1.0, ..Default::default() };

        let mut model_sharp = CspecMetric::new(&sharp, &seed).unwrap();
        let mut model_soft = CspecMetric::new(&soft, &seed).unwrap();
        let mut rng_a = seed.stream("driver");
        let mut rng_b = seed.stream("driver");
        let mut last_sharp = 0.0;
        let mut last_soft = 0.0;
        for _ in 0..20 {
            last_sharp = model_sharp.advance_epoch(&mut rng_a).train_loss;
            last_soft = model_soft.advance_epoch(&mut rng_b).train_loss;
        }
        assert!(last_sharp < last_soft);
    }
}
