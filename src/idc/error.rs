//! Error types for capacitor parameter validation.

use thiserror::Error;

/// Result type for capacitor specification operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while validating capacitor parameters.
///
/// These are the only failures of the generator: once a
/// [`CapacitorSpec`](super::CapacitorSpec) exists, layout cannot fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecError {
    /// A parameter is out of range or malformed.
    #[error("{message}")]
    InvalidParameter {
        /// Parameter name as exposed on the command line.
        name: &'static str,
        /// User-facing description of what's wrong.
        message: String,
    },

    /// Neither a total width nor a finger length was supplied.
    #[error("Either total width or finger length must be provided.")]
    MissingWidth,
}

impl SpecError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Returns the offending parameter name, if the error concerns one.
    #[must_use]
    pub const fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(*name),
            Self::MissingWidth => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = SpecError::invalid_parameter("gap", "Gap must be greater than 0.");
        assert_eq!(err.to_string(), "Gap must be greater than 0.");
        assert_eq!(err.parameter(), Some("gap"));
    }

    #[test]
    fn missing_width_display() {
        let err = SpecError::MissingWidth;
        assert!(err.to_string().contains("total width or finger length"));
        assert_eq!(err.parameter(), None);
    }
}
