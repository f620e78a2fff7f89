//! Validate command implementation
//!
//! Runs the whole wiring sequence short of `fit`: resolves configuration,
//! selects the variant, and exercises every constructor, so a config that
//! validates here will launch.

use crate::cli::logging::{log, LogLevel};
use crate::config::ValidateArgs;
use crate::model::{MetricModel, ModelVariant};
use crate::seed::SeedContext;
use crate::train::callback::assemble;
use crate::train::TrainerBuilder;

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    let spec = args.resolve().map_err(|e| format!("Config error: {e}"))?;

    let variant = ModelVariant::select(&spec).map_err(|e| e.to_string())?;
    let seed = SeedContext::new(spec.seed_everything);

    let callbacks = assemble(&spec).map_err(|e| e.to_string())?;
    let trainer = TrainerBuilder::new(spec.trainer.init_args.clone())
        .callbacks(callbacks)
        .build(&seed)
        .map_err(|e| e.to_string())?;
    MetricModel::build(variant, &spec, &seed).map_err(|e| e.to_string())?;

    log(level, LogLevel::Normal, "Configuration valid");
    log(level, LogLevel::Normal, &format!("  Selected variant: {variant}"));

    if args.detailed {
        let ignored: Vec<&str> = ModelVariant::configured(&spec)
            .into_iter()
            .filter(|v| *v != variant)
            .map(|v| v.config_key())
            .collect();
        if !ignored.is_empty() {
            log(
                level,
                LogLevel::Normal,
                &format!("  Ignored variant namespaces: {}", ignored.join(", ")),
            );
        }
        log(level, LogLevel::Normal, &format!("  Seed: {}", spec.seed_everything));
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  Early stopping: monitor={}, patience={}",
                spec.early_stopping.init_args.monitor, spec.early_stopping.init_args.patience
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
            &format!(
                "  Driver: max_epochs={}, callbacks={}",
                trainer.options().max_epochs,
                trainer.callback_names().join(", ")
            ),
        );
    }

    Ok(())
}
