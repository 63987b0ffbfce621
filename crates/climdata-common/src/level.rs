//! Pressure-level specifications (`levelout`).
//!
//! A job requests vertical levels in one of three shapes:
//! - a symbolic level set (`sfc`, `plev37`, `plev19`, `plev8`), rendered without a unit
//! - a single numeric level (`500` or `500hPa`)
//! - a list of numeric levels (`[500, 750hPa, 1000]`)
//!
//! Numeric levels are rendered with the `hPa` suffix. Symbolic names are only
//! accepted on their own, never inside a list.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::error::{value_kind, LevelSpecError};

/// Digits, optionally followed by the literal `hPa`. Anchored at both ends.
static NUMERIC_LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(hPa)?$").expect("numeric level pattern is valid"));

/// Returns true if `token` is a single numeric pressure level such as `500` or `500hPa`.
///
/// The check is purely lexical: the digit portion is never parsed, so there
/// is no upper bound on its length.
pub fn is_numeric_level(token: &str) -> bool {
    NUMERIC_LEVEL.is_match(token)
}

/// Symbolic level sets that stand for a standard collection of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSet {
    Surface,
    Plev37,
    Plev19,
    Plev8,
}

impl LevelSet {
    pub const ALL: [LevelSet; 4] = [
        LevelSet::Surface,
        LevelSet::Plev37,
        LevelSet::Plev19,
        LevelSet::Plev8,
    ];

    /// Keyword as written in the configuration file.
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelSet::Surface => "sfc",
            LevelSet::Plev37 => "plev37",
            LevelSet::Plev19 => "plev19",
            LevelSet::Plev8 => "plev8",
        }
    }

    /// Exact, case-sensitive keyword lookup.
    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.as_str() == s)
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit suffix appended to each level when rendering a request or a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// `hPa`
    HectoPascal,
    /// No suffix (symbolic level sets).
    Empty,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::HectoPascal => "hPa",
            Unit::Empty => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `levelout` value.
///
/// Displays as written in the file, lists with quoted items: `sfc`, `500hPa`, `['500', '750hPa']`.
///
/// Constructed only through [`LevelSpec::parse`], [`LevelSpec::from_value`]
/// or deserialization, so every variant holds well-formed levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSpec {
    Keyword(LevelSet),
    Single(String),
    List(Vec<String>),
}

impl LevelSpec {
    /// Classify a single string: keyword first, then numeric level.
    pub fn parse(s: &str) -> Result<Self, LevelSpecError> {
        if let Some(set) = LevelSet::from_keyword(s) {
            Ok(LevelSpec::Keyword(set))
        } else if is_numeric_level(s) {
            Ok(LevelSpec::Single(s.to_string()))
        } else {
            Err(LevelSpecError::InvalidLevelSpec(s.to_string()))
        }
    }

    /// Classify a raw configuration value.
    ///
    /// Lists must consist only of numeric levels. An empty list is accepted.
    pub fn from_value(value: &Value) -> Result<Self, LevelSpecError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Sequence(items) => {
                let levels: Option<Vec<String>> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) if is_numeric_level(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect();

                levels
                    .map(LevelSpec::List)
                    .ok_or_else(|| LevelSpecError::InvalidLevelList(items.clone()))
            }
            other => Err(LevelSpecError::InvalidLevelSpecType(
                value_kind(other).to_string(),
            )),
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            LevelSpec::Keyword(_) => Unit::Empty,
            LevelSpec::Single(_) | LevelSpec::List(_) => Unit::HectoPascal,
        }
    }

    /// Level tokens in configuration order, as written.
    pub fn levels(&self) -> Vec<&str> {
        match self {
            LevelSpec::Keyword(set) => vec![set.as_str()],
            LevelSpec::Single(level) => vec![level.as_str()],
            LevelSpec::List(levels) => levels.iter().map(String::as_str).collect(),
        }
    }

    /// Levels with the unit appended, e.g. `["500hPa", "750hPa"]` or `["sfc"]`.
    ///
    /// Tokens that already carry the `hPa` suffix are not suffixed twice.
    pub fn rendered_levels(&self) -> Vec<String> {
        let unit = self.unit();
        self.levels()
            .into_iter()
            .map(|level| {
                let bare = level.strip_suffix(Unit::HectoPascal.as_str()).unwrap_or(level);
                match unit {
                    Unit::HectoPascal => format!("{}{}", bare, unit),
                    Unit::Empty => level.to_string(),
                }
            })
            .collect()
    }
}

impl FromStr for LevelSpec {
    type Err = LevelSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelSpec::Keyword(set) => write!(f, "{}", set),
            LevelSpec::Single(level) => f.write_str(level),
            LevelSpec::List(levels) => {
                let quoted: Vec<String> = levels.iter().map(|level| format!("'{}'", level)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

impl<'de> Deserialize<'de> for LevelSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        LevelSpec::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Check a raw `levelout` value and return the unit to append to its levels.
///
/// Returns `"hPa"` for numeric levels and `""` for the symbolic level sets.
pub fn validate_and_get_unit(levelout: &Value) -> Result<Unit, LevelSpecError> {
    LevelSpec::from_value(levelout).map(|spec| spec.unit())
}
