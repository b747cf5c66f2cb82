//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("file selection #{index} is missing required field `{field}`")]
    MissingSelectionField { index: usize, field: String },

    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("Pass --config with the path to an rpmpack.toml file."),
            Self::MissingSelectionField { .. } => {
                Some("Every [[files]] entry needs both `src` and `dest`.")
            }
            Self::InvalidPattern { .. } => {
                Some("Fix the glob syntax; `*`, `?`, `[...]`, `{a,b}` and `**` are supported.")
            }
            Self::InvalidValue { .. } | Self::ParseError { .. } => {
                Some("Fix the configuration value and retry the command.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NotFound { .. } => "config.not_found",
            Self::ParseError { .. } => "config.parse_error",
            Self::MissingSelectionField { .. } => "config.missing_selection_field",
            Self::InvalidPattern { .. } => "config.invalid_pattern",
            Self::InvalidValue { .. } => "config.invalid_value",
        };
        Some(code)
    }
}
