//! Top-level error types.
//!
//! Parameter validation errors live in [`crate::idc::SpecError`] and file
//! output errors in [`crate::kicad::KicadError`]. [`Error`] wraps them
//! together with [`ConfigError`] for the command line front end.

use std::path::PathBuf;

use thiserror::Error;

use crate::idc::SpecError;
use crate::kicad::KicadError;

/// Any failure of a generator run.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A capacitor parameter is invalid.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The footprint could not be written.
    #[error(transparent)]
    Output(#[from] KicadError),
}

impl Error {
    /// Whether the failure is a rejected input parameter.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::Spec(_))
    }
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}
