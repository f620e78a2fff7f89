//! Driver option mapping
//!
//! The `trainer.init_args` namespace is a plain mapping of option names to
//! values. The resolver deliberately does not validate it: driver options
//! belong to the driver, and its constructor rejects anything it does not
//! understand. The `callbacks` key inside the mapping is reserved - the
//! assembled callback list always overwrites it before construction.

use serde_json::{Map, Value};

/// Raw driver options as resolved from configuration.
pub type DriverOptions = Map<String, Value>;

/// Key under which the assembled callback list is merged into the driver
/// options.
pub const CALLBACKS_KEY: &str = "callbacks";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_options_accept_arbitrary_keys() {
        let opts: DriverOptions =
            serde_yaml::from_str("max_epochs: 10\nanything_goes: here\n").unwrap();
        assert_eq!(opts["max_epochs"], Value::from(10));
        assert_eq!(opts["anything_goes"], Value::from("here"));
    }

    #[test]
    fn test_values_keep_their_types() {
        let opts: DriverOptions =
            serde_yaml::from_str("enable_progress_bar: false\ndevices: 2\n").unwrap();
        assert_eq!(opts["enable_progress_bar"], Value::from(false));
        assert_eq!(opts["devices"], Value::from(2));
    }
}
