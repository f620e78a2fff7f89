//! Training-loop driver and its lifecycle callbacks
//!
//! - `callback` - the callback trait, the three assembled callbacks, and
//!   the manager that dispatches them in list order
//! - `builder` - merges callbacks into the driver option mapping
//! - `trainer` - the blocking epoch loop

pub mod callback;

mod builder;
mod trainer;

pub use builder::TrainerBuilder;
pub use trainer::{DriverError, FitSummary, MetricsHistory, Trainer, TrainerOptions};
