//! Error types for controller setup and config loading.

use thiserror::Error;

/// Errors raised while setting up a character controller.
///
/// Per-frame updates never fail; everything here happens once, at init.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A required external handle was not supplied.
    #[error("Missing required handle: {0}")]
    MissingHandle(&'static str),

    /// A config value is NaN or infinite.
    #[error("Config field '{field}' must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    /// A config value that must not be negative is.
    #[error("Config field '{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Errors that can occur when loading a movement config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}
