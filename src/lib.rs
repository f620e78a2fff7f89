//! Metrica: configuration-driven training launcher for translation quality
//! metric models
//!
//! One hierarchical configuration selects exactly one of five metric model
//! variants, assembles the fixed-order training callbacks, parameterizes
//! the training-loop driver, and starts the run:
//!
//! ```no_run
//! use metrica::launch::train_from_config;
//!
//! let overrides = vec!["ranking_metric.init_args.margin=0.5".to_string()];
//! let summary = train_from_config(None, &overrides)?;
//! println!("trained for {} epochs", summary.epochs_run);
//! # Ok::<(), metrica::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod launch;
pub mod model;
pub mod seed;
pub mod train;
pub mod warnings;

pub use error::{Error, Result};
pub use launch::{launch_training, train_from_config};
pub use model::{MetricModel, ModelVariant};
pub use seed::{SeedContext, DEFAULT_SEED};
pub use train::{FitSummary, Trainer, TrainerBuilder};
