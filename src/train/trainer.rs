//! Training-loop driver
//!
//! The driver owns the epoch loop: it asks the model for one epoch of
//! losses at a time, fires callbacks in list order at every hook, and
//! stops when a callback requests it or `max_epochs` is reached. Gradient
//! math, optimizer stepping and distributed execution live behind the
//! model boundary and are not this crate's concern.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::callback::{CallbackAction, CallbackContext, CallbackManager};
use crate::config::DriverOptions;
use crate::model::MetricModel;
use crate::seed::SeedContext;
use crate::warnings::{self, WarningCategory};

/// Accelerators the driver accepts.
const ACCELERATORS: &[&str] = &["cpu", "gpu", "auto"];

/// Worker count below which the data-loading heuristic warns.
const RECOMMENDED_WORKERS: usize = 4;

/// Errors raised by the driver constructor.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid trainer options: {0}")]
    InvalidOptions(String),

    #[error("invalid max_epochs: 0 (must be >= 1)")]
    ZeroEpochs,

    #[error("invalid devices: 0 (must be >= 1)")]
    ZeroDevices,

    #[error("invalid limit_train_batches: 0 (must be >= 1)")]
    ZeroBatches,

    #[error("unsupported accelerator: '{0}' (must be one of: cpu, gpu, auto)")]
    UnsupportedAccelerator(String),
}

/// Typed driver options, validated from the raw option mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerOptions {
    /// Upper bound on training epochs.
    pub max_epochs: usize,
    /// Compute backend the run is placed on.
    pub accelerator: String,
    /// Number of devices on the accelerator.
    pub devices: usize,
    /// Data-loading worker processes.
    pub num_workers: usize,
    /// Training batches per epoch.
    pub limit_train_batches: usize,
    /// Print an epoch summary line while training.
    pub enable_progress_bar: bool,
    /// Names of the attached callbacks; filled by the builder merge.
    pub callbacks: Vec<String>,
}

impl Default for TrainerOptions {
    fn default() -> Self {
        Self {
            max_epochs: 1000,
            accelerator: "cpu".to_string(),
            devices: 1,
            num_workers: 2,
            limit_train_batches: 100,
            enable_progress_bar: true,
            callbacks: Vec::new(),
        }
    }
}

impl TrainerOptions {
    /// Deserialize and validate options from the raw mapping.
    pub fn from_map(options: &DriverOptions) -> Result<Self, DriverError> {
        let parsed: TrainerOptions =
            serde_json::from_value(Value::Object(options.clone()))
                .map_err(|e| DriverError::InvalidOptions(e.to_string()))?;
        if parsed.max_epochs == 0 {
            return Err(DriverError::ZeroEpochs);
        }
        if parsed.devices == 0 {
            return Err(DriverError::ZeroDevices);
        }
        if parsed.limit_train_batches == 0 {
            return Err(DriverError::ZeroBatches);
        }
        if !ACCELERATORS.contains(&parsed.accelerator.as_str()) {
            return Err(DriverError::UnsupportedAccelerator(parsed.accelerator));
        }
        Ok(parsed)
    }
}

/// Loss trajectory of a finished or in-flight run.
#[derive(Debug, Clone, Default)]
pub struct MetricsHistory {
    pub train_losses: Vec<f32>,
    pub val_losses: Vec<f32>,
}

impl MetricsHistory {
    pub fn best_val_loss(&self) -> Option<f32> {
        self.val_losses.iter().copied().reduce(f32::min)
    }
}

/// Outcome of a `fit` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    pub epochs_run: usize,
    pub stopped_early: bool,
    pub final_train_loss: f32,
    pub best_val_loss: Option<f32>,
}

/// The training-loop driver.
#[derive(Debug)]
pub struct Trainer {
    options: TrainerOptions,
    callbacks: CallbackManager,
    rng: StdRng,
    pub metrics: MetricsHistory,
}

impl Trainer {
    pub fn new(options: TrainerOptions, callbacks: CallbackManager, seed: &SeedContext) -> Self {
        Self {
            options,
            callbacks,
            rng: seed.stream("driver"),
            metrics: MetricsHistory::default(),
        }
    }

    pub fn options(&self) -> &TrainerOptions {
        &self.options
    }

    pub fn callback_names(&self) -> Vec<&'static str> {
        self.callbacks.names()
    }

    /// Run the blocking training loop.
    pub fn fit(&mut self, model: &mut MetricModel) -> FitSummary {
        if self.options.num_workers < RECOMMENDED_WORKERS {
            warnings::emit(
                WarningCategory::DataLoaderWorkers,
                &format!(
                    "dataloader is using {} worker processes; consider increasing num_workers \
                     for better throughput",
                    self.options.num_workers
                ),
            );
        }

        let steps_per_epoch = self.options.limit_train_batches;
        let mut ctx = CallbackContext {
            max_epochs: self.options.max_epochs,
            steps_per_epoch,
            lr: model.learning_rate() as f32,
            ..Default::default()
        };

        self.callbacks.on_train_begin(&ctx);

        let mut stopped_early = false;
        for epoch in 0..self.options.max_epochs {
            let stats = model.advance_epoch(&mut self.rng);
            ctx.epoch = epoch;
            ctx.loss = stats.train_loss;
            ctx.val_loss = stats.val_loss;

            for step in 0..steps_per_epoch {
                ctx.step = step;
                ctx.global_step = epoch * steps_per_epoch + step;
                if self.callbacks.on_step_end(&ctx) == CallbackAction::Stop {
                    stopped_early = true;
                }
            }

            self.metrics.train_losses.push(stats.train_loss);
            if let Some(val_loss) = stats.val_loss {
                self.metrics.val_losses.push(val_loss);
            }

            if self.options.enable_progress_bar {
                match stats.val_loss {
                    Some(val_loss) => println!(
                        "Epoch {}/{}: train_loss={:.4}, val_loss={:.4}",
                        epoch + 1,
                        self.options.max_epochs,
                        stats.train_loss,
                        val_loss
                    ),
                    None => println!(
                        "Epoch {}/{}: train_loss={:.4}",
                        epoch + 1,
                        self.options.max_epochs,
                        stats.train_loss
                    ),
                }
            }

            if self.callbacks.on_epoch_end(&ctx) == CallbackAction::Stop {
                stopped_early = true;
            }
            if stopped_early {
                break;
            }
        }

        self.callbacks.on_train_end(&ctx);

        FitSummary {
            epochs_run: self.metrics.train_losses.len(),
            stopped_early,
            final_train_loss: self.metrics.train_losses.last().copied().unwrap_or(0.0),
            best_val_loss: self.metrics.best_val_loss(),
        }
    }
}
