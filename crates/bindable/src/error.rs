#![forbid(unsafe_code)]

//! Errors from reading [`NotifyConfig`](crate::NotifyConfig) out of the
//! environment.
//!
//! The notification path itself has no failure modes; these only surface
//! from [`NotifyConfig::try_from_env_with`](crate::NotifyConfig::try_from_env_with).

/// Errors from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean flag held something other than an on/off word.
    InvalidFlag { var: &'static str, value: String },
    /// A numeric setting did not parse as an unsigned integer.
    InvalidNumber { var: &'static str, value: String },
}

impl ConfigError {
    /// Name of the environment variable that failed to parse.
    #[must_use]
    pub fn var(&self) -> &'static str {
        match self {
            Self::InvalidFlag { var, .. } | Self::InvalidNumber { var, .. } => var,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlag { var, value } => {
                write!(f, "{var}: expected an on/off flag, got '{value}'")
            }
            Self::InvalidNumber { var, value } => {
                write!(f, "{var}: expected an unsigned integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
