//! Early stopping callback

use super::traits::{CallbackAction, CallbackContext, CallbackError, TrainerCallback};
use crate::config::{EarlyStoppingConfig, MonitorMode};

/// Stops training when the monitored metric stops improving.
///
/// Monitors `val_loss` or `train_loss`; when validation data is not
/// configured the validation monitor falls back to the training loss.
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    monitor: Monitor,
    patience: usize,
    min_delta: f64,
    mode: MonitorMode,
    best: f64,
    epochs_without_improvement: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Monitor {
    ValLoss,
    TrainLoss,
}

impl EarlyStopping {
    pub fn from_spec(cfg: &EarlyStoppingConfig) -> Result<Self, CallbackError> {
        if cfg.patience == 0 {
            return Err(CallbackError::InvalidPatience(cfg.patience));
        }
        if !cfg.min_delta.is_finite() || cfg.min_delta < 0.0 {
            return Err(CallbackError::InvalidMinDelta(cfg.min_delta));
        }
        let monitor = match cfg.monitor.as_str() {
            "val_loss" => Monitor::ValLoss,
            "train_loss" | "loss" => Monitor::TrainLoss,
            other => return Err(CallbackError::UnknownMonitor(other.to_string())),
        };
        let best = match cfg.mode {
            MonitorMode::Min => f64::INFINITY,
            MonitorMode::Max => f64::NEG_INFINITY,
        };
        Ok(Self {
            monitor,
            patience: cfg.patience,
            min_delta: cfg.min_delta,
            mode: cfg.mode,
            best,
            epochs_without_improvement: 0,
        })
    }

    fn monitored(&self, ctx: &CallbackContext) -> f64 {
        let value = match self.monitor {
            Monitor::ValLoss => ctx.val_loss.unwrap_or(ctx.loss),
            Monitor::TrainLoss => ctx.loss,
        };
        f64::from(value)
    }

    fn improved(&self, value: f64) -> bool {
        match self.mode {
            MonitorMode::Min => value < self.best - self.min_delta,
            MonitorMode::Max => value > self.best + self.min_delta,
        }
    }
}

impl TrainerCallback for EarlyStopping {
    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let value = self.monitored(ctx);
        if self.improved(value) {
            self.best = value;
            self.epochs_without_improvement = 0;
        } else {
            self.epochs_without_improvement += 1;
        }

        if self.epochs_without_improvement >= self.patience {
            eprintln!(
                "Early stopping: no improvement for {} epochs (best: {:.4})",
                self.patience, self.best
            );
            CallbackAction::Stop
        } else {
            CallbackAction::Continue
        }
    }

    fn name(&self) -> &'static str {
        "EarlyStopping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn early_stopping(patience: usize, min_delta: f64) -> EarlyStopping {
        EarlyStopping::from_spec(&EarlyStoppingConfig {
            patience,
            min_delta,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_stops_after_patience_without_improvement() {
        let mut es = early_stopping(3, 0.001);
        let mut ctx = CallbackContext { loss: 1.0, ..Default::default() };
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);

        ctx.loss = 0.9;
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);

        // Three epochs inside the delta band exhaust the patience.
        ctx.loss = 0.8995;
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Stop);
    }

    #[test]
    fn test_improvement_resets_patience() {
        let mut es = early_stopping(2, 0.01);
        let mut ctx = CallbackContext { loss: 1.0, ..Default::default() };
        es.on_epoch_end(&ctx);
        es.on_epoch_end(&ctx);
        ctx.loss = 0.5;
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);
        assert_eq!(es.epochs_without_improvement, 0);
    }

    #[test]
    fn test_val_monitor_prefers_val_loss() {
        let mut es = early_stopping(3, 0.0);
        let ctx = CallbackContext { loss: 1.0, val_loss: Some(0.5), ..Default::default() };
        es.on_epoch_end(&ctx);
        assert!((es.best - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_val_monitor_falls_back_to_train_loss() {
        let mut es = early_stopping(3, 0.0);
        let ctx = CallbackContext { loss: 0.7, val_loss: None, ..Default::default() };
        es.on_epoch_end(&ctx);
        assert!((es.best - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_max_mode_tracks_increases() {
        let mut es = EarlyStopping::from_spec(&EarlyStoppingConfig {
            monitor: "train_loss".to_string(),
            patience: 2,
            min_delta: 0.0,
            mode: MonitorMode::Max,
        })
        .unwrap();
        let mut ctx = CallbackContext { loss: 0.1, ..Default::default() };
        es.on_epoch_end(&ctx);
        ctx.loss = 0.2;
        assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);
        assert_eq!(es.epochs_without_improvement, 0);
    }

    #[test]
    fn test_rejects_zero_patience() {
        let cfg = EarlyStoppingConfig { patience: 0, ..Default::default() };
        assert!(matches!(
            EarlyStopping::from_spec(&cfg),
            Err(CallbackError::InvalidPatience(0))
        ));
    }

    #[test]
    fn test_rejects_negative_min_delta() {
        let cfg = EarlyStoppingConfig { min_delta: -0.1, ..Default::default() };
        assert!(matches!(
            EarlyStopping::from_spec(&cfg),
            Err(CallbackError::InvalidMinDelta(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_monitor() {
        let cfg = EarlyStoppingConfig { monitor: "bleu".to_string(), ..Default::default() };
        assert!(matches!(
            EarlyStopping::from_spec(&cfg),
            Err(CallbackError::UnknownMonitor(_))
        ));
    }

    #[test]
    fn test_name() {
        assert_eq!(early_stopping(1, 0.0).name(), "EarlyStopping");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A flat loss always stops after exactly `patience` epochs.
        #[test]
        fn flat_loss_stops_at_patience(
            patience in 1usize..10,
            loss in 0.1f32..10.0,
        ) {
            let mut es = EarlyStopping::from_spec(&EarlyStoppingConfig {
                patience,
                ..Default::default()
            })
            .unwrap();
            let ctx = CallbackContext { loss, ..Default::default() };
            // First epoch establishes the baseline.
            prop_assert_eq!(es.on_epoch_end(&ctx), CallbackAction::Continue);
            for epoch in 1..=patience {
                let action = es.on_epoch_end(&ctx);
                if epoch < patience {
                    prop_assert_eq!(action, CallbackAction::Continue);
                } else {
                    prop_assert_eq!(action, CallbackAction::Stop);
                }
            }
        }
    }
}
