//! Driver construction
//!
//! Merges the assembled callback list into the driver option mapping and
//! builds the driver from the result. The `callbacks` key is reserved: the
//! assembled list always overwrites whatever user configuration put there,
//! so callbacks can never be double-registered.

use serde_json::Value;

use super::callback::{CallbackManager, TrainerCallback};
use super::trainer::{DriverError, Trainer, TrainerOptions};
use crate::config::{DriverOptions, CALLBACKS_KEY};
use crate::seed::SeedContext;

pub struct TrainerBuilder {
    options: DriverOptions,
    callbacks: Vec<Box<dyn TrainerCallback>>,
}

impl TrainerBuilder {
    /// Start from the resolved `trainer.init_args` mapping.
    pub fn new(options: DriverOptions) -> Self {
        Self { options, callbacks: Vec::new() }
    }

    /// Attach the assembled callbacks, overwriting any `callbacks` entry
    /// already present in the option mapping.
    pub fn callbacks(mut self, callbacks: Vec<Box<dyn TrainerCallback>>) -> Self {
        let names: Vec<Value> =
            callbacks.iter().map(|cb| Value::String(cb.name().to_string())).collect();
        self.options.insert(CALLBACKS_KEY.to_string(), Value::Array(names));
        self.callbacks = callbacks;
        self
    }

    /// The merged option mapping, as handed to the driver constructor.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Construct the driver. Option validation is entirely the driver's;
    /// the builder only guarantees the callback merge.
    pub fn build(self, seed: &SeedContext) -> Result<Trainer, DriverError> {
        let options = TrainerOptions::from_map(&self.options)?;
        Ok(Trainer::new(options, CallbackManager::new(self.callbacks), seed))
    }
}
