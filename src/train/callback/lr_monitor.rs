//! Learning rate monitor callback

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Granularity at which the learning rate is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggingInterval {
    Step,
    Epoch,
}

/// Records the learning rate over the course of training.
///
/// Takes no user configuration: this launcher always monitors at per-step
/// granularity.
#[derive(Clone, Debug)]
pub struct LearningRateMonitor {
    interval: LoggingInterval,
    history: Vec<f32>,
}

impl LearningRateMonitor {
    pub fn new() -> Self {
        Self { interval: LoggingInterval::Step, history: Vec::new() }
    }

    pub fn interval(&self) -> LoggingInterval {
        self.interval
    }

    /// Recorded learning rates, one per interval tick.
    pub fn history(&self) -> &[f32] {
        &self.history
    }
}

impl Default for LearningRateMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerCallback for LearningRateMonitor {
    fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if self.interval == LoggingInterval::Step {
            self.history.push(ctx.lr);
        }
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if self.interval == LoggingInterval::Epoch {
            self.history.push(ctx.lr);
        }
        CallbackAction::Continue
    }

    fn on_train_end(&mut self, _ctx: &CallbackContext) {
        if let Some(last) = self.history.last() {
            println!("LearningRateMonitor: {} samples, final lr {last:e}", self.history.len());
        }
    }

    fn name(&self) -> &'static str {
        "LearningRateMonitor"
    }
}
