//! Common types shared by the climdata services: the job configuration
//! model, pressure-level validation and the run summary.

pub mod config;
pub mod error;
pub mod level;
pub mod summary;

pub use config::{Area, JobConfig, Overrides, PipelineStage, Setting, VarList, YearRange};
pub use error::{ConfigError, ConfigResult, LevelSpecError};
pub use level::{is_numeric_level, validate_and_get_unit, LevelSet, LevelSpec, Unit};
pub use summary::Summary;
