//! Callback system for training lifecycle events
//!
//! The driver fires `on_train_begin`, `on_step_end`, `on_epoch_end` and
//! `on_train_end` on every callback, in list order. The list for a run is
//! produced by [`assemble`] and always contains early stopping,
//! checkpointing and the learning rate monitor, in that order.

mod assembly;
mod checkpoint;
mod early_stopping;
mod lr_monitor;
mod manager;
mod traits;

pub use assembly::assemble;
pub use checkpoint::ModelCheckpoint;
pub use early_stopping::EarlyStopping;
pub use lr_monitor::{LearningRateMonitor, LoggingInterval};
pub use manager::CallbackManager;
pub use traits::{CallbackAction, CallbackContext, CallbackError, TrainerCallback};
