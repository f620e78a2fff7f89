//! Configuration resolution
//!
//! Merges an optional base configuration file with CLI-style dotted
//! `key=value` overrides and deserializes the result into a validated
//! [`TrainingSpec`]. Resolution is a pure parse: no side effects, no
//! construction of models, callbacks or drivers.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::schema::TrainingSpec;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("config file {path} must contain a mapping at the top level")]
    NotAMapping { path: PathBuf },

    #[error("invalid override '{0}': expected dotted key=value")]
    InvalidOverride(String),

    #[error("invalid configuration: {0}")]
    Invalid(#[source] serde_yaml::Error),
}

/// Resolve a `TrainingSpec` from an optional config file and overrides.
///
/// Overrides are `key=value` tokens whose keys use dots to address nested
/// namespaces, e.g. `ranking_metric.init_args.margin=0.5`. A leading `--`
/// on a token is accepted and stripped. Later overrides win over earlier
/// ones, and every override wins over the file.
pub fn resolve(cfg: Option<&Path>, overrides: &[String]) -> Result<TrainingSpec, ConfigError> {
    let mut tree = match cfg {
        Some(path) => load_file(path)?,
        None => Mapping::new(),
    };

    for token in overrides {
        let (key, raw) = split_override(token)?;
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::InvalidOverride(token.clone()));
        }
        insert_path(&mut tree, &segments, parse_scalar(raw));
    }

    serde_yaml::from_value(Value::Mapping(tree)).map_err(ConfigError::Invalid)
}

fn load_file(path: &Path) -> Result<Mapping, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        Value::Mapping(map) => Ok(map),
        // An empty file parses as null; treat it like an absent file.
        Value::Null => Ok(Mapping::new()),
        _ => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

fn split_override(token: &str) -> Result<(&str, &str), ConfigError> {
    let stripped = token.strip_prefix("--").unwrap_or(token);
    stripped
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| ConfigError::InvalidOverride(token.to_string()))
}

/// Parse an override value as a YAML scalar so numbers and booleans keep
/// their types; anything that does not parse stays a string.
fn parse_scalar(raw: &str) -> Value {
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn insert_path(map: &mut Mapping, segments: &[&str], value: Value) {
    let head = Value::String(segments[0].to_string());
    if segments.len() == 1 {
        map.insert(head, value);
        return;
    }
    let child = map
        .entry(head)
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !child.is_mapping() {
        // A scalar from the file is being refined by a dotted override;
        // the override wins.
        *child = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(inner) = child {
        insert_path(inner, &segments[1..], value);
    }
}
