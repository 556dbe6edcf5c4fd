//! Error types for json2robot
//!
//! Every failure of a conversion call surfaces as a [`ConvertError`]. None of
//! them are retried: conversion is deterministic, so the same inputs fail the
//! same way.

use thiserror::Error;

/// Errors raised by the converter and its collaborators
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input JSON failed structural validation
    #[error("malformed input at `{path}`: {message}")]
    MalformedInput { path: String, message: String },

    /// Invalid pattern override, security level, or config file
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Action name has no mapping and passthrough is disabled
    #[error("unsupported action `{action}` at step {step}")]
    UnsupportedAction { action: String, step: usize },

    /// Dangerous pattern matched under the strict level.
    /// `preview` is a redacted rendering of the offending value.
    #[error("security violation at step {step}: `{preview}` matched {rule_id} (`{pattern}`)")]
    SecurityViolation {
        rule_id: String,
        pattern: String,
        step: usize,
        preview: String,
    },

    /// I/O failure in the output writer or config loader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Build a malformed-input error for a field path
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::MalformedInput { .. } | ConvertError::UnsupportedAction { .. } => 2,
            ConvertError::Configuration(_) => 3,
            ConvertError::SecurityViolation { .. } => 4,
            ConvertError::Io(_) => 5,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConvertError>;
