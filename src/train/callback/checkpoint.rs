//! Model checkpoint callback

use std::path::PathBuf;

use super::traits::{CallbackAction, CallbackContext, CallbackError, TrainerCallback};
use crate::config::{CheckpointConfig, MonitorMode};

/// Saves a checkpoint whenever the monitored metric improves, retaining the
/// `save_top_k` best ones. `save_top_k == 0` disables saving entirely.
#[derive(Clone, Debug)]
pub struct ModelCheckpoint {
    dirpath: PathBuf,
    monitor: String,
    mode: MonitorMode,
    save_top_k: usize,
    best: f64,
    saved: Vec<PathBuf>,
    pub(crate) last_saved_epoch: Option<usize>,
}

impl ModelCheckpoint {
    pub fn from_spec(cfg: &CheckpointConfig) -> Result<Self, CallbackError> {
        if cfg.dirpath.as_os_str().is_empty() {
            return Err(CallbackError::EmptyDirpath);
        }
        match cfg.monitor.as_str() {
            "val_loss" | "train_loss" | "loss" => {}
            other => return Err(CallbackError::UnknownMonitor(other.to_string())),
        }
        let best = match cfg.mode {
            MonitorMode::Min => f64::INFINITY,
            MonitorMode::Max => f64::NEG_INFINITY,
        };
        Ok(Self {
            dirpath: cfg.dirpath.clone(),
            monitor: cfg.monitor.clone(),
            mode: cfg.mode,
            save_top_k: cfg.save_top_k,
            best,
            saved: Vec::new(),
            last_saved_epoch: None,
        })
    }

    /// Path of the checkpoint written for an epoch.
    pub fn checkpoint_path(&self, epoch: usize) -> PathBuf {
        self.dirpath.join(format!("epoch_{epoch}.ckpt.json"))
    }

    fn monitored(&self, ctx: &CallbackContext) -> f64 {
        let value = match self.monitor.as_str() {
            "val_loss" => ctx.val_loss.unwrap_or(ctx.loss),
            _ => ctx.loss,
        };
        f64::from(value)
    }

    fn improved(&self, value: f64) -> bool {
        match self.mode {
            MonitorMode::Min => value < self.best,
            MonitorMode::Max => value > self.best,
        }
    }

    fn save(&mut self, epoch: usize, value: f64) {
        std::fs::create_dir_all(&self.dirpath).ok();
        let path = self.checkpoint_path(epoch);
        let record = serde_json::json!({
            "epoch": epoch,
            "monitor": self.monitor,
            "value": value,
        });
        if std::fs::write(&path, record.to_string()).is_ok() {
            self.saved.push(path);
            self.last_saved_epoch = Some(epoch);
        }
        while self.saved.len() > self.save_top_k {
            let stale = self.saved.remove(0);
            std::fs::remove_file(stale).ok();
        }
    }
}

impl TrainerCallback for ModelCheckpoint {
    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if self.save_top_k == 0 {
            return CallbackAction::Continue;
        }
        let value = self.monitored(ctx);
        if self.improved(value) {
            self.best = value;
            self.save(ctx.epoch, value);
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "ModelCheckpoint"
    }
}
