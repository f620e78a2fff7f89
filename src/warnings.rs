//! Structured warning filter
//!
//! Non-fatal conditions are reported through category-keyed warnings rather
//! than ad hoc message strings. Suppression is keyed by the stable category,
//! so a reworded message cannot silently re-enable console noise.

use std::collections::HashSet;
use std::fmt;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Stable identifiers for every warning the crate can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCategory {
    /// Data-loader worker-count heuristic fired inside the driver.
    DataLoaderWorkers,
    /// More than one model variant namespace was configured; only the
    /// highest-priority one is used.
    ExtraVariantConfigs,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataLoaderWorkers => write!(f, "dataloader_workers"),
            Self::ExtraVariantConfigs => write!(f, "extra_variant_configs"),
        }
    }
}

static SUPPRESSED: LazyLock<Mutex<HashSet<WarningCategory>>> =
    LazyLock::new(|| Mutex::new(HashSet::new()));

/// Suppress a category for the rest of the process.
pub fn suppress(category: WarningCategory) {
    SUPPRESSED.lock().unwrap_or_else(PoisonError::into_inner).insert(category);
}

pub fn is_suppressed(category: WarningCategory) -> bool {
    SUPPRESSED.lock().unwrap_or_else(PoisonError::into_inner).contains(&category)
}

/// Print a warning to stderr unless its category is suppressed.
pub fn emit(category: WarningCategory, message: &str) {
    if !is_suppressed(category) {
        eprintln!("warning[{category}]: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppress_is_sticky() {
        suppress(WarningCategory::DataLoaderWorkers);
        assert!(is_suppressed(WarningCategory::DataLoaderWorkers));
        // Emitting a suppressed category is a no-op rather than an error.
        emit(WarningCategory::DataLoaderWorkers, "heuristic fired");
    }

    #[test]
    fn test_categories_display_as_stable_keys() {
        assert_eq!(WarningCategory::DataLoaderWorkers.to_string(), "dataloader_workers");
        assert_eq!(WarningCategory::ExtraVariantConfigs.to_string(), "extra_variant_configs");
    }
}
