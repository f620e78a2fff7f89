//! Core traits and types for the callback system
//!
//! - `CallbackContext` - state passed to callbacks at every hook
//! - `CallbackAction` - what a callback asks the driver to do
//! - `TrainerCallback` - the trait all callbacks implement
//! - `CallbackError` - constructor rejections, propagated unmodified

use thiserror::Error;

/// Context passed to callbacks with current training state
#[derive(Clone, Debug, Default)]
pub struct CallbackContext {
    /// Current epoch (0-indexed)
    pub epoch: usize,
    /// Total epochs planned
    pub max_epochs: usize,
    /// Current step within epoch
    pub step: usize,
    /// Steps per epoch
    pub steps_per_epoch: usize,
    /// Global step count
    pub global_step: usize,
    /// Training loss of the current epoch
    pub loss: f32,
    /// Validation loss, when validation data is configured
    pub val_loss: Option<f32>,
    /// Current learning rate
    pub lr: f32,
}

/// Action a callback requests from the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// Continue training normally
    Continue,
    /// Stop training after the current epoch
    Stop,
}

/// Trait for training callbacks
///
/// All methods have default no-op implementations; implement only the
/// events the callback cares about.
pub trait TrainerCallback: Send {
    /// Called once before the first epoch
    fn on_train_begin(&mut self, _ctx: &CallbackContext) {}

    /// Called after each training step
    fn on_step_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after each epoch
    fn on_epoch_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called once after training ends
    fn on_train_end(&mut self, _ctx: &CallbackContext) {}

    /// Callback name for audit output and logging
    fn name(&self) -> &'static str;
}

/// Errors raised by callback constructors
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("invalid patience: {0} (must be >= 1)")]
    InvalidPatience(usize),

    #[error("invalid min_delta: {0} (must be finite and >= 0)")]
    InvalidMinDelta(f64),

    #[error("unsupported monitor metric: '{0}' (must be one of: val_loss, train_loss)")]
    UnknownMonitor(String),

    #[error("checkpoint dirpath must not be empty")]
    EmptyDirpath,
}
