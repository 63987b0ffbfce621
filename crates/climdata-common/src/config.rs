//! Job configuration for a climate-data retrieval run.
//!
//! Loaded from a single YAML file. The `levelout` field is validated while
//! the file is decoded, so a loaded [`JobConfig`] always carries a well-formed
//! [`LevelSpec`].

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{describe_value, ConfigError, ConfigResult};
use crate::level::{LevelSpec, Unit};

/// Root of the YAML job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Staging directory for downloads
    pub tmpdir: PathBuf,
    /// Directory for the final files
    pub storedir: PathBuf,
    pub dataset: String,
    pub varlist: VarList,
    pub year: YearRange,
    pub levelout: LevelSpec,
    pub freq: Setting,
    pub grid: Setting,
    pub area: Area,
    #[serde(default = "default_nprocs")]
    pub nprocs: usize,
    /// How requests are chunked (e.g. "yearly", "monthly")
    pub download_request: Setting,
    #[serde(default)]
    pub do_retrieve: bool,
    #[serde(default)]
    pub do_postproc: bool,
    #[serde(default)]
    pub do_align: bool,
}

fn default_nprocs() -> usize {
    1
}

/// Years to process, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearRange {
    pub begin: i32,
    pub end: i32,
    /// Update existing datasets instead of starting fresh
    #[serde(default)]
    pub update: bool,
}

/// One variable name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VarList {
    One(String),
    Many(Vec<String>),
}

impl VarList {
    pub fn names(&self) -> Vec<&str> {
        match self {
            VarList::One(name) => vec![name.as_str()],
            VarList::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for VarList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarList::One(name) => f.write_str(name),
            VarList::Many(names) => {
                let quoted: Vec<String> = names.iter().map(|name| format!("'{}'", name)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

/// A free-form option passed through to the retrieval request (`freq`, `grid`, ...).
///
/// Any YAML value is accepted: `mon`, `0.25`, `[0.25, 0.25]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Setting(pub Value);

impl Setting {
    /// The value as text, if it is a plain string.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => f.write_str(&describe_value(other)),
        }
    }
}

/// Area selection: a named region or explicit bounds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Area {
    Bounds(Vec<f64>),
    Named(String),
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::Named(name) => f.write_str(name),
            Area::Bounds(bounds) => {
                let parts: Vec<String> = bounds.iter().map(f64::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Pipeline stages a job can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Retrieve,
    Postprocess,
    Align,
}

impl PipelineStage {
    /// Human-readable description used in the run summary.
    pub fn description(&self) -> &'static str {
        match self {
            PipelineStage::Retrieve => "Retrieving data",
            PipelineStage::Postprocess => "Postprocess data",
            PipelineStage::Align => "Set a common time axis for monthly data",
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub nprocs: Option<usize>,
    pub update: bool,
}

impl JobConfig {
    /// Load a job configuration from a YAML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: JobConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            dataset = %config.dataset,
            levelout = %config.levelout,
            path = %path.display(),
            "Loaded job config"
        );
        Ok(config)
    }

    /// Parse a job configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply command-line overrides.
    ///
    /// `update` can only switch updating on; it never clears a value set in the file.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(nprocs) = overrides.nprocs {
            self.nprocs = nprocs;
        }
        if overrides.update {
            self.year.update = true;
        }
    }

    /// Checks that span more than one field, run after overrides are applied.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.year.begin > self.year.end {
            return Err(ConfigError::InvalidYearRange {
                begin: self.year.begin,
                end: self.year.end,
            });
        }
        if self.nprocs == 0 {
            return Err(ConfigError::InvalidProcessCount(self.nprocs));
        }
        Ok(())
    }

    /// Unit suffix for the configured levels.
    pub fn unit(&self) -> Unit {
        self.levelout.unit()
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.year.begin..=self.year.end
    }

    /// Enabled pipeline stages, in execution order.
    pub fn actions(&self) -> Vec<PipelineStage> {
        [
            (self.do_retrieve, PipelineStage::Retrieve),
            (self.do_postproc, PipelineStage::Postprocess),
            (self.do_align, PipelineStage::Align),
        ]
        .into_iter()
        .filter_map(|(enabled, stage)| enabled.then_some(stage))
        .collect()
    }
}
