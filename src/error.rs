//! Configuration errors, raised once at scene initialization

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse scene config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Group '{group}' must have at least one element")]
    InvalidCount { group: String },
    #[error("Group '{group}': {field} must be positive, got {value}")]
    NonPositive {
        group: String,
        field: &'static str,
        value: f32,
    },
    #[error("Group '{group}': approach rate must lie strictly between 0 and 1, got {rate}")]
    InvalidRate { group: String, rate: f32 },
    #[error("Group '{group}': {field} range is inverted ({min} > {max})")]
    InvalidRange {
        group: String,
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("Group name '{0}' is used more than once")]
    DuplicateGroup(String),
    #[error("Group '{group}': tree jitter must not be negative, got {value}")]
    NegativeJitter { group: String, value: f32 },
}
