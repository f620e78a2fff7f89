//! Train command implementation

use crate::cli::logging::{log, LogLevel};
use crate::config::TrainArgs;
use crate::launch::launch_training;

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    match &args.cfg {
        Some(path) => log(
            level,
            LogLevel::Normal,
            &format!("Metrica: training from {}", path.display()),
        ),
        None => log(level, LogLevel::Normal, "Metrica: training from CLI overrides"),
    }

    let spec = args.resolve().map_err(|e| format!("Config error: {e}"))?;
    log(level, LogLevel::Verbose, &format!("  Seed: {}", spec.seed_everything));

    let summary = launch_training(&spec).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training complete: {} epochs, final train loss {:.4}{}",
            summary.epochs_run,
            summary.final_train_loss,
            if summary.stopped_early { " (stopped early)" } else { "" }
        ),
    );
    Ok(())
}
