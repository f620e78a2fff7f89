//! Callback assembly
//!
//! Builds the training-lifecycle callbacks in their fixed order:
//! early stopping first, then checkpointing, then the learning rate
//! monitor. Drivers invoke callbacks in list order at every hook, so this
//! order guarantees the stop decision for an epoch is made before its
//! checkpoint decision.

use super::checkpoint::ModelCheckpoint;
use super::early_stopping::EarlyStopping;
use super::lr_monitor::LearningRateMonitor;
use super::traits::{CallbackError, TrainerCallback};
use crate::config::TrainingSpec;

/// Assemble the callback list for a run.
///
/// Always returns exactly three callbacks in the order
/// `[EarlyStopping, ModelCheckpoint, LearningRateMonitor]`. Constructor
/// rejections propagate unmodified.
pub fn assemble(spec: &TrainingSpec) -> Result<Vec<Box<dyn TrainerCallback>>, CallbackError> {
    let early_stopping = EarlyStopping::from_spec(&spec.early_stopping.init_args)?;
    let checkpoint = ModelCheckpoint::from_spec(&spec.model_checkpoint.init_args)?;
    let lr_monitor = LearningRateMonitor::new();
    Ok(vec![Box::new(early_stopping), Box::new(checkpoint), Box::new(lr_monitor)])
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::resolve;
    use proptest::prelude::*;

    proptest! {
        /// Valid callback configuration never changes the list shape.
        #[test]
        fn assembled_list_shape_is_invariant(
            patience in 1usize..20,
            save_top_k in 0usize..5,
        ) {
            let tokens = vec![
                format!("early_stopping.init_args.patience={patience}"),
                format!("model_checkpoint.init_args.save_top_k={save_top_k}"),
            ];
            let spec = resolve(None, &tokens).unwrap();
            let callbacks = assemble(&spec).unwrap();
            prop_assert_eq!(callbacks.len(), 3);
            prop_assert_eq!(callbacks[0].name(), "EarlyStopping");
            prop_assert_eq!(callbacks[1].name(), "ModelCheckpoint");
            prop_assert_eq!(callbacks[2].name(), "LearningRateMonitor");
        }
    }
}
