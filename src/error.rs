//! Crate-level error types.

use std::fmt;

/// Errors produced by the splat-orbit crate.
#[derive(Debug)]
pub enum OrbitError {
    /// Failed to fetch or parse a splat model.
    ModelLoad {
        /// Source path handed to the loader.
        path: String,
        /// Loader-provided reason.
        reason: String,
    },
    /// No viewer is registered under the given ID.
    UnknownViewer(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl OrbitError {
    /// Build a [`OrbitError::ModelLoad`] from a path and any displayable
    /// reason.
    pub fn model_load(
        path: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoad { path, reason } => {
                write!(f, "failed to load {path}: {reason}")
            }
            Self::UnknownViewer(id) => write!(f, "unknown viewer: {id}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
