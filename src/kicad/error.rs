//! Error types for KiCad footprint output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for KiCad output operations.
pub type KicadResult<T> = Result<T, KicadError>;

/// Errors that can occur while writing a footprint.
#[derive(Debug, Error)]
pub enum KicadError {
    /// Failed to create the output directory.
    #[error("Failed to create directory: {path}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the footprint file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to serialise the parameter record for the file preamble.
    #[error("Failed to serialise parameters")]
    Serialise {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl KicadError {
    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn file_write_error_display() {
        let err = KicadError::file_write(
            "idc.pretty/IDC.kicad_mod",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write file: idc.pretty/IDC.kicad_mod");
        assert!(err.source().is_some());
    }

    #[test]
    fn create_dir_error_display() {
        let err = KicadError::create_dir("out", io::Error::other("boom"));
        assert!(err.to_string().contains("create directory: out"));
    }
}
