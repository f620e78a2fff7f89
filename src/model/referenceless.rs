//! Referenceless regression metric
//!
//! Quality estimation from hypothesis and source alone. Same constructor
//! arguments as the regression metric; convergence is slower because the
//! reference signal is missing.

use rand::rngs::StdRng;
use rand::Rng;

use super::regression::{estimator_epoch, validate};
use super::{EpochStats, ModelError};
use crate::config::ReferencelessConfig;
use crate::seed::SeedContext;

const MODEL_NAME: &str = "ReferencelessRegression";

/// Pace factor relative to the reference-based regression metric.
const REFERENCELESS_PACE: f32 = 0.8;

#[derive(Debug)]
pub struct ReferencelessRegression {
    cfg: ReferencelessConfig,
    epoch: usize,
    initial_loss: f32,
}

impl ReferencelessRegression {
    pub fn new(cfg: &ReferencelessConfig, seed: &SeedContext) -> Result<Self, ModelError> {
        validate(MODEL_NAME, cfg)?;
        let mut rng = seed.stream(MODEL_NAME);
        Ok(Self {
            cfg: cfg.clone(),
            epoch: 0,
            initial_loss: 1.1 + rng.random_range(0.0..0.1),
        })
    }

    pub fn config(&self) -> &ReferencelessConfig {
        &self.cfg
    }

    pub(crate) fn advance_epoch(&mut self, rng: &mut StdRng) -> EpochStats {
        let stats =
            estimator_epoch(&self.cfg, self.epoch, self.initial_loss, REFERENCELESS_PACE, rng);
        self.epoch += 1;
        stats
    }
}
