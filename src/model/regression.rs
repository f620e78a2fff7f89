//! Regression metric
//!
//! Scores a translation hypothesis against its source and reference with a
//! feed-forward estimator on top of a pretrained encoder.

use rand::rngs::StdRng;
use rand::Rng;

use super::{
    check_activation, check_batch_size, check_dropout, check_hidden_sizes, check_non_negative,
    check_positive, EpochStats, ModelError,
};
use crate::config::RegressionConfig;
use crate::seed::SeedContext;

const MODEL_NAME: &str = "RegressionMetric";

#[derive(Debug)]
pub struct RegressionMetric {
    cfg: RegressionConfig,
    epoch: usize,
    initial_loss: f32,
}

impl RegressionMetric {
    pub fn new(cfg: &RegressionConfig, seed: &SeedContext) -> Result<Self, ModelError> {
        validate(MODEL_NAME, cfg)?;
        let mut rng = seed.stream(MODEL_NAME);
        Ok(Self {
            cfg: cfg.clone(),
            epoch: 0,
            initial_loss: 1.0 + rng.random_range(0.0..0.1),
        })
    }

    pub fn config(&self) -> &RegressionConfig {
        &self.cfg
    }

    pub(crate) fn advance_epoch(&mut self, rng: &mut StdRng) -> EpochStats {
        let stats = estimator_epoch(&self.cfg, self.epoch, self.initial_loss, 1.0, rng);
        self.epoch += 1;
        stats
    }
}

/// Range checks shared with the referenceless variant, which takes the same
/// constructor arguments.
pub(super) fn validate(model: &'static str, cfg: &RegressionConfig) -> Result<(), ModelError> {
    check_positive(model, "learning_rate", cfg.learning_rate)?;
    check_positive(model, "encoder_learning_rate", cfg.encoder_learning_rate)?;
    check_non_negative(model, "nr_frozen_epochs", cfg.nr_frozen_epochs)?;
    check_dropout(model, cfg.dropout)?;
    check_batch_size(model, cfg.batch_size)?;
    check_hidden_sizes(model, &cfg.hidden_sizes)?;
    check_activation(model, &cfg.activations)?;
    if let Some(activation) = &cfg.final_activation {
        check_activation(model, activation)?;
    }
    Ok(())
}

/// Epoch loss curve shared by the estimator-head variants: exponential decay
/// scaled by the head learning rate, slowed while the encoder is frozen.
/// Fractional `nr_frozen_epochs` freezes the first epoch only.
pub(super) fn estimator_epoch(
    cfg: &RegressionConfig,
    epoch: usize,
    initial_loss: f32,
    pace: f32,
    rng: &mut StdRng,
) -> EpochStats {
    let frozen_epochs = cfg.nr_frozen_epochs.ceil() as usize;
    let mut rate = (cfg.learning_rate * 1e3) as f32 * pace;
    if epoch < frozen_epochs {
        rate *= 0.5;
    }
    let train_loss = initial_loss * (-rate * epoch as f32).exp() + rng.random_range(0.0..0.005);
    let val_loss = cfg
        .validation_data
        .as_ref()
        .map(|_| train_loss * 1.08 + rng.random_range(0.0..0.005));
    EpochStats { train_loss, val_loss }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_accepts_defaults() {
        let model = RegressionMetric::new(&RegressionConfig::default(), &SeedContext::default());
        assert!(model.is_ok());
    }

    #[test]
    fn test_rejects_zero_learning_rate() {
        let cfg = RegressionConfig { learning_rate: 0.0, ..Default::default() };
        let err = RegressionMetric::new(&cfg, &SeedContext::default()).unwrap_err();
        assert!(err.to_string().contains("learning_rate"));
    }

    #[test]
    fn test_rejects_dropout_of_one() {
        let cfg = RegressionConfig { dropout: 1.0, ..Default::default() };
        assert!(RegressionMetric::new(&cfg, &SeedContext::default()).is_err());
    }

    #[test]
    fn test_rejects_empty_hidden_sizes() {
        let cfg = RegressionConfig { hidden_sizes: vec![], ..Default::default() };
        assert!(RegressionMetric::new(&cfg, &SeedContext::default()).is_err());
    }

    #[test]
    fn test_rejects_unknown_activation() {
        let cfg = RegressionConfig { activations: "Swish".to_string(), ..Default::default() };
        let err = RegressionMetric::new(&cfg, &SeedContext::default()).unwrap_err();
        assert!(err.to_string().contains("Swish"));
    }

    #[test]
    fn test_loss_decreases_over_epochs() {
        let seed = SeedContext::new(3);
        let mut model = RegressionMetric::new(&RegressionConfig::default(), &seed).unwrap();
        let mut rng = seed.stream("driver");
        let first = model.advance_epoch(&mut rng).train_loss;
        for _ in 0..48 {
            model.advance_epoch(&mut rng);
        }
        let last = model.advance_epoch(&mut rng).train_loss;
        assert!(last < first);
    }

    #[test]
    fn test_val_loss_requires_validation_data() {
        let seed = SeedContext::default();
        let mut without =
            RegressionMetric::new(&RegressionConfig::default(), &seed).unwrap();
        assert!(without.advance_epoch(&mut seed.stream("driver")).val_loss.is_none());

        let cfg = RegressionConfig {
            validation_data: Some("dev.csv".into()),
            ..Default::default()
        };
        let mut with = RegressionMetric::new(&cfg, &seed).unwrap();
        assert!(with.advance_epoch(&mut seed.stream("driver")).val_loss.is_some());
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let seed = SeedContext::new(12);
        let run = |seed: &SeedContext| {
            let mut model =
                RegressionMetric::new(&RegressionConfig::default(), seed).unwrap();
            let mut rng = seed.stream("driver");
            (0..5).map(|_| model.advance_epoch(&mut rng).train_loss).collect::<Vec<_>>()
        };
        assert_eq!(run(&seed), run(&seed));
    }
}
