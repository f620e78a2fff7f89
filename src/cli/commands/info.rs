//! Info command implementation

use crate::cli::logging::{log, LogLevel};
use crate::config::{InfoArgs, OutputFormat};
use crate::model::ModelVariant;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = args.resolve().map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&spec).map_err(|e| e.to_string())?;
            println!("{rendered}");
        }
        OutputFormat::Yaml => {
            let rendered = serde_yaml::to_string(&spec).map_err(|e| e.to_string())?;
            println!("{rendered}");
        }
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Resolved configuration:");
            log(level, LogLevel::Normal, &format!("  Seed: {}", spec.seed_everything));
            let configured = ModelVariant::configured(&spec);
            if configured.is_empty() {
                log(level, LogLevel::Normal, "  Variants: none configured");
            } else {
                let keys: Vec<&str> = configured.iter().map(|v| v.config_key()).collect();
                log(level, LogLevel::Normal, &format!("  Variants: {}", keys.join(", ")));
            }
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "  Early stopping: monitor={}, patience={}, min_delta={}",
                    spec.early_stopping.init_args.monitor,
                    spec.early_stopping.init_args.patience,
                    spec.early_stopping.init_args.min_delta
                ),
            );
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "  Checkpoints: {} (top {})",
                    spec.model_checkpoint.init_args.dirpath.display(),
                    spec.model_checkpoint.init_args.save_top_k
                ),
            );
            log(
                level,
                LogLevel::Normal,
                &format!("  Driver options: {}", spec.trainer.init_args.len()),
            );
        }
    }

    Ok(())
}
