//! Callback manager for dispatching events in list order

use std::fmt;

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Dispatches lifecycle events to callbacks in their list order.
///
/// Every callback sees every event: a `Stop` request is remembered and
/// returned after the full pass, so a checkpoint positioned after early
/// stopping still saves the epoch that triggered the stop.
pub struct CallbackManager {
    callbacks: Vec<Box<dyn TrainerCallback>>,
}

impl fmt::Debug for CallbackManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackManager")
            .field("callbacks", &self.names())
            .finish()
    }
}

impl CallbackManager {
    pub fn new(callbacks: Vec<Box<dyn TrainerCallback>>) -> Self {
        Self { callbacks }
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Callback names, in invocation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }

    pub fn on_train_begin(&mut self, ctx: &CallbackContext) {
        for cb in &mut self.callbacks {
            cb.on_train_begin(ctx);
        }
    }

    pub fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let mut action = CallbackAction::Continue;
        for cb in &mut self.callbacks {
            if cb.on_step_end(ctx) == CallbackAction::Stop {
                action = CallbackAction::Stop;
            }
        }
        action
    }

    pub fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let mut action = CallbackAction::Continue;
        for cb in &mut self.callbacks {
            if cb.on_epoch_end(ctx) == CallbackAction::Stop {
                action = CallbackAction::Stop;
            }
        }
        action
    }

    pub fn on_train_end(&mut self, ctx: &CallbackContext) {
        for cb in &mut self.callbacks {
            cb.on_train_end(ctx);
        }
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
