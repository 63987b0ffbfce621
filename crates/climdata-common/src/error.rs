//! Error types for climdata configuration handling.

use std::path::PathBuf;

use serde_yaml::Value;
use thiserror::Error;

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A `levelout` value that does not describe a valid set of pressure levels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelSpecError {
    #[error("Invalid levelout specification: '{0}'.")]
    InvalidLevelSpec(String),

    #[error(
        "Invalid levelout list: {}. Each element must be a valid level (e.g., '500' or '500hPa').",
        describe_sequence(.0)
    )]
    InvalidLevelList(Vec<Value>),

    #[error(
        "Invalid input: levelout must be either one of 'sfc', 'plev37', 'plev19', 'plev8', \
         or a valid string or list of strings (got {0})."
    )]
    InvalidLevelSpecType(String),
}

/// Errors raised while loading or checking a job configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid year range: begin {begin} is after end {end}")]
    InvalidYearRange { begin: i32, end: i32 },

    #[error("Invalid number of parallel processes: {0} (must be at least 1)")]
    InvalidProcessCount(usize),
}

/// Short name for the kind of a YAML value, used in error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn describe_sequence(items: &[Value]) -> String {
    let parts: Vec<String> = items.iter().map(describe_value).collect();
    format!("[{}]", parts.join(", "))
}

/// Render a YAML value for messages and summaries: strings quoted, lists in brackets.
pub(crate) fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Sequence(items) => describe_sequence(items),
        Value::Mapping(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", describe_value(k), describe_value(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, describe_value(&tagged.value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_list_message_shows_full_sequence() {
        let err = LevelSpecError::InvalidLevelList(vec![
            Value::String("500".to_string()),
            Value::Number(42.into()),
            Value::String("sfc".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid levelout list: ['500', 42, 'sfc']. Each element must be a valid level (e.g., '500' or '500hPa')."
        );
    }

    #[test]
    fn test_invalid_spec_message() {
        let err = LevelSpecError::InvalidLevelSpec("abc".to_string());
        assert_eq!(err.to_string(), "Invalid levelout specification: 'abc'.");
    }

    #[test]
    fn test_type_message_names_kind() {
        let err = LevelSpecError::InvalidLevelSpecType("integer".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'sfc', 'plev37', 'plev19', 'plev8'"));
        assert!(msg.ends_with("(got integer)."));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&Value::Null), "null");
        assert_eq!(value_kind(&Value::Bool(true)), "boolean");
        assert_eq!(value_kind(&Value::Number(42.into())), "integer");
        assert_eq!(value_kind(&serde_yaml::from_str::<Value>("2.5").unwrap()), "float");
        assert_eq!(value_kind(&Value::Mapping(Default::default())), "mapping");
    }

    #[test]
    fn test_year_range_message() {
        let err = ConfigError::InvalidYearRange { begin: 2020, end: 1990 };
        assert_eq!(
            err.to_string(),
            "Invalid year range: begin 2020 is after end 1990"
        );
    }
}
