//! # Error Handling
//!
//! Typed errors for the compression library, in a small hierarchy:
//! configuration problems, unsupported encode formats, input decode
//! failures, probe (codec) failures with their underlying cause attached,
//! and I/O.
//!
//! One deliberate absence: "nothing fit the budget" is not an error. That
//! outcome is reported as [`fit_search::Outcome::Infeasible`] on a
//! successful result, so callers can always tell "searched and found
//! nothing under budget" apart from "the codec itself failed".

use std::{error::Error as StdError, fmt};

/// Base error type for the compression library.
#[derive(Debug)]
pub enum CompressError {
    /// Configuration validation errors.
    Config {
        field: String,
        value: String,
        reason: String,
    },
    /// The requested encode format is not supported by the probe.
    UnsupportedFormat { requested: String },
    /// The input image could not be decoded.
    Decode {
        path: Option<String>,
        reason: String,
    },
    /// The encode probe failed during resample or encode.
    Probe {
        stage: &'static str,
        source: Box<dyn StdError + Send + Sync>,
    },
    /// The budget search rejected its inputs or aborted.
    Search(fit_search::SearchError),
    /// I/O errors reading inputs or writing artifacts.
    Io {
        operation: String,
        source: std::io::Error,
    },
}

impl CompressError {
    /// Create a configuration error.
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported-format error.
    pub fn unsupported_format(requested: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            requested: requested.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            path: None,
            reason: reason.into(),
        }
    }

    /// Create a probe error with the underlying cause attached.
    pub fn probe(stage: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Probe {
            stage,
            source: Box::new(source),
        }
    }

    /// Create an I/O error.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Get the error category as a string.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::Decode { .. } => "decode",
            Self::Probe { .. } => "probe",
            Self::Search(_) => "search",
            Self::Io { .. } => "io",
        }
    }
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::Config {
                field,
                value,
                reason,
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )
            }
            CompressError::UnsupportedFormat { requested } => {
                write!(f, "Unsupported encode format '{}'", requested)
            }
            CompressError::Decode { path, reason } => {
                if let Some(path) = path {
                    write!(f, "Failed to decode '{}': {}", path, reason)
                } else {
                    write!(f, "Failed to decode input image: {}", reason)
                }
            }
            CompressError::Probe { stage, source } => {
                write!(f, "Encode probe failed during {}: {}", stage, source)
            }
            CompressError::Search(source) => write!(f, "Budget search failed: {}", source),
            CompressError::Io { operation, source } => {
                write!(f, "I/O error during {}: {}", operation, source)
            }
        }
    }
}

impl StdError for CompressError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Probe { source, .. } => Some(source.as_ref()),
            Self::Search(source) => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<fit_search::SearchError> for CompressError {
    fn from(error: fit_search::SearchError) -> Self {
        Self::Search(error)
    }
}

impl From<std::io::Error> for CompressError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}

/// Result type alias using our custom error type.
pub type CompressResult<T> = Result<T, CompressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = CompressError::config("budget", "0", "must be greater than 0");
        assert_eq!(error.category(), "config");
        assert!(error.to_string().contains("budget"));
    }

    #[test]
    fn test_unsupported_format_names_the_format() {
        let error = CompressError::unsupported_format("webp");
        assert_eq!(error.category(), "unsupported_format");
        assert!(error.to_string().contains("webp"));
    }

    #[test]
    fn test_probe_error_keeps_source() {
        let cause = std::io::Error::other("encoder choked");
        let error = CompressError::probe("encode", cause);
        assert_eq!(error.category(), "probe");
        assert!(error.source().is_some());
        assert!(error.to_string().contains("encode"));
    }

    #[test]
    fn test_search_error_converts() {
        let error: CompressError = fit_search::SearchError::InvalidBudget(0).into();
        assert_eq!(error.category(), "search");
        assert!(error.source().is_some());
    }
}
