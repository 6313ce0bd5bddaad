//! Error types for input scalars.
//!
//! Two layers of failure exist. [`ConfigurationError`] is returned while a
//! scalar is being built and means no scalar was produced. [`ScalarError`] is
//! returned while a value is parsed; the host engine reports it for the field
//! being resolved without aborting sibling fields.

use std::fmt;

use async_graphql::{Error, ErrorExtensions};

/// Errors raised while building a scalar or loading scalar definitions.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The scalar has no name.
    #[error("\"name\" is required")]
    MissingName,

    /// The name is not a valid GraphQL name.
    #[error("\"{0}\" is not a valid GraphQL name")]
    InvalidName(String),

    /// A bound cannot be compared against (NaN or infinite).
    #[error("scalar \"{scalar}\": {bound} bound {value} is not a finite number")]
    InvalidBound {
        /// Scalar name.
        scalar: String,
        /// `"min"` or `"max"`.
        bound: &'static str,
        /// Rendered bound value.
        value: String,
    },

    /// `min` is greater than `max`, so no value could ever pass.
    #[error("scalar \"{scalar}\": min {min} is greater than max {max}")]
    InvertedBounds {
        /// Scalar name.
        scalar: String,
        /// Rendered minimum.
        min: String,
        /// Rendered maximum.
        max: String,
    },

    /// Two scalars share a name within one registry.
    #[error("scalar \"{0}\" is defined more than once")]
    DuplicateName(String),

    /// Scalar definitions could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scalar definitions are not valid TOML for the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure category of a rejected input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not coercible to the scalar's number family.
    TypeError,
    /// The input is outside the configured `min`/`max`.
    RangeError,
    /// The input was rejected by the `test` predicate or a custom handler.
    ValidationError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeError => "TypeError",
            Self::RangeError => "RangeError",
            Self::ValidationError => "ValidationError",
        };
        f.write_str(name)
    }
}

/// Errors raised while parsing an input value.
///
/// Values are stored pre-rendered so messages read the same regardless of
/// the number family (`Invalid value 2.9. Expected minimum "3".`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalarError {
    /// The input could not be coerced, or a sanitized value left the family.
    #[error("Invalid value {value}. Expected type \"{scalar}\".")]
    Type {
        /// Scalar name.
        scalar: String,
        /// Offending input, rendered as GraphQL.
        value: String,
    },

    /// The value is below the configured minimum.
    #[error("Invalid value {value}. Expected minimum \"{min}\".")]
    BelowMinimum {
        /// Scalar name.
        scalar: String,
        /// Offending value.
        value: String,
        /// Configured minimum.
        min: String,
    },

    /// The value is above the configured maximum.
    #[error("Invalid value {value}. Expected maximum \"{max}\".")]
    AboveMaximum {
        /// Scalar name.
        scalar: String,
        /// Offending value.
        value: String,
        /// Configured maximum.
        max: String,
    },

    /// The `test` predicate rejected the value.
    #[error("Invalid value {value}.")]
    Validation {
        /// Scalar name.
        scalar: String,
        /// Offending value.
        value: String,
    },

    /// A custom error handler rejected the value with its own message.
    #[error("Invalid value {value}. {message}.")]
    Custom {
        /// Scalar name.
        scalar: String,
        /// Offending value.
        value: String,
        /// Handler-supplied message.
        message: String,
    },
}

impl ScalarError {
    /// Creates a custom rejection, for use inside error handlers.
    pub fn custom(
        scalar: impl Into<String>,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::Custom {
            scalar: scalar.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Returns the failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::TypeError,
            Self::BelowMinimum { .. } | Self::AboveMaximum { .. } => ErrorKind::RangeError,
            Self::Validation { .. } | Self::Custom { .. } => ErrorKind::ValidationError,
        }
    }

    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Type { .. } => "INVALID_TYPE",
            Self::BelowMinimum { .. } => "BELOW_MINIMUM",
            Self::AboveMaximum { .. } => "ABOVE_MAXIMUM",
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::Custom { .. } => "VALIDATION_FAILED",
        }
    }

    /// Returns the name of the scalar that rejected the value.
    #[must_use]
    pub fn scalar(&self) -> &str {
        match self {
            Self::Type { scalar, .. }
            | Self::BelowMinimum { scalar, .. }
            | Self::AboveMaximum { scalar, .. }
            | Self::Validation { scalar, .. }
            | Self::Custom { scalar, .. } => scalar,
        }
    }
}

impl ErrorExtensions for ScalarError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code());
            e.set("kind", self.kind().to_string());
            e.set("scalar", self.scalar());
            match self {
                Self::BelowMinimum { min, .. } => e.set("min", min.as_str()),
                Self::AboveMaximum { max, .. } => e.set("max", max.as_str()),
                _ => {}
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn below_min() -> ScalarError {
        ScalarError::BelowMinimum {
            scalar: "Age".into(),
            value: "2.9".into(),
            min: "3".into(),
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            below_min().to_string(),
            "Invalid value 2.9. Expected minimum \"3\"."
        );
        assert_eq!(
            ScalarError::Type {
                scalar: "NonInt".into(),
                value: "\"3\"".into(),
            }
            .to_string(),
            "Invalid value \"3\". Expected type \"NonInt\"."
        );
        assert_eq!(
            ScalarError::Validation {
                scalar: "Odd".into(),
                value: "4".into(),
            }
            .to_string(),
            "Invalid value 4."
        );
        assert_eq!(
            ScalarError::custom("Odd", 4, "Expected an odd number").to_string(),
            "Invalid value 4. Expected an odd number."
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(below_min().kind(), ErrorKind::RangeError);
        assert_eq!(
            ScalarError::Type {
                scalar: "X".into(),
                value: "true".into()
            }
            .kind(),
            ErrorKind::TypeError
        );
        assert_eq!(
            ScalarError::custom("X", 1, "nope").kind(),
            ErrorKind::ValidationError
        );
        assert_eq!(ErrorKind::RangeError.to_string(), "RangeError");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(below_min().error_code(), "BELOW_MINIMUM");
        assert_eq!(below_min().scalar(), "Age");
    }

    #[test]
    fn test_extensions() {
        let err = below_min().extend();
        assert_eq!(err.message, "Invalid value 2.9. Expected minimum \"3\".");
        let extensions = err.extensions.expect("extensions should be set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("BELOW_MINIMUM"))
        );
        assert_eq!(
            extensions.get("min"),
            Some(&async_graphql::Value::from("3"))
        );
    }

    #[test]
    fn test_configuration_messages() {
        assert!(ConfigurationError::MissingName.to_string().contains("name"));
        let err = ConfigurationError::InvertedBounds {
            scalar: "Pct".into(),
            min: "10".into(),
            max: "1".into(),
        };
        assert_eq!(err.to_string(), "scalar \"Pct\": min 10 is greater than max 1");
    }
}
