//! Training orchestration
//!
//! The top-level wiring sequence: select the model variant, create the
//! seed context, assemble callbacks, build the driver, construct the model,
//! print the audit blocks, and hand control to the driver's blocking `fit`.
//! There is no retry logic anywhere; the first failure aborts the run.

use std::path::Path;

use crate::config::{self, TrainingSpec};
use crate::error::Result;
use crate::model::{MetricModel, ModelVariant};
use crate::seed::SeedContext;
use crate::train::callback::assemble;
use crate::train::{FitSummary, TrainerBuilder};
use crate::warnings::{self, WarningCategory};

/// Resolve configuration and launch the training run.
pub fn train_from_config(cfg: Option<&Path>, overrides: &[String]) -> Result<FitSummary> {
    let spec = config::resolve(cfg, overrides)?;
    launch_training(&spec)
}

/// Launch a training run from a resolved configuration.
///
/// Prints the merged driver options and the selected variant's constructor
/// arguments as JSON audit blocks before training starts, then blocks in
/// `fit` until the driver finishes.
pub fn launch_training(spec: &TrainingSpec) -> Result<FitSummary> {
    // Selection is a pure lookup; with no variant configured the run ends
    // here, before any callback or driver exists.
    let variant = ModelVariant::select(spec)?;

    let seed = SeedContext::new(spec.seed_everything);

    let callbacks = assemble(spec)?;
    let builder = TrainerBuilder::new(spec.trainer.init_args.clone()).callbacks(callbacks);

    println!("TRAINER ARGUMENTS:");
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(builder.options().clone()))?
    );
    let mut trainer = builder.build(&seed)?;

    println!("MODEL ARGUMENTS:");
    println!("{}", serde_json::to_string_pretty(&variant.init_args(spec)?)?);
    let mut model = MetricModel::build(variant, spec, &seed)?;

    // The driver's worker-count heuristic is noise for this launcher.
    warnings::suppress(WarningCategory::DataLoaderWorkers);

    Ok(trainer.fit(&mut model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::ModelError;

    fn tokens(overrides: &[&str]) -> Vec<String> {
        overrides.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_no_variant_aborts_before_wiring() {
        let err = train_from_config(None, &[]).unwrap_err();
        match err {
            Error::Model(ModelError::NoModelConfigured) => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ranking_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let summary = train_from_config(
            None,
            &tokens(&[
                "ranking_metric.init_args.margin=0.5",
                "trainer.init_args.max_epochs=10",
                "trainer.init_args.limit_train_batches=2",
                "trainer.init_args.enable_progress_bar=false",
                &format!(
                    "model_checkpoint.init_args.dirpath={}",
                    dir.path().display()
                ),
            ]),
        )
        .unwrap();
        assert!(summary.epochs_run <= 10);
        assert!(summary.final_train_loss.is_finite());
    }

    #[test]
    fn test_launch_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let run = || {
            train_from_config(
                None,
                &tokens(&[
                    "cspec_metric.init_args.temperature=0.2",
                    "trainer.init_args.max_epochs=6",
                    "trainer.init_args.limit_train_batches=2",
                    "trainer.init_args.enable_progress_bar=false",
                    &format!(
                        "model_checkpoint.init_args.dirpath={}",
                        dir.path().display()
                    ),
                ]),
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_bad_callback_config_aborts_launch() {
        let err = train_from_config(
            None,
            &tokens(&[
                "ranking_metric.init_args.margin=0.5",
                "early_stopping.init_args.patience=0",
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Callback(_)));
    }

    #[test]
    fn test_bad_driver_option_aborts_launch() {
        let err = train_from_config(
            None,
            &tokens(&[
                "ranking_metric.init_args.margin=0.5",
                "trainer.init_args.strategy=ddp",
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Driver(_)));
    }
}
