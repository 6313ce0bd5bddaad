//! Scalar configuration.
//!
//! [`ScalarConfig`] is the full set of rules a scalar is built from. Every
//! optional field defaults to "rule not applied".
//!
//! # Example
//!
//! ```ignore
//! let percentage = ScalarConfig::<Int>::new("Percentage")
//!     .description("A whole percentage")
//!     .min(0)
//!     .max(100)
//!     .build()?;
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use async_graphql::Value;

use crate::error::{ConfigurationError, ScalarError};
use crate::handler::{ErrorHandler, Violation};
use crate::kind::NumericKind;
use crate::scalar::InputScalar;

/// GraphQL name regex: [_A-Za-z][_0-9A-Za-z]*
static NAME_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("Invalid GraphQL name regex")
});

/// Pre-validation remap applied to the coerced value, widened first.
pub type Sanitizer<N> =
    Arc<dyn Fn(<N as NumericKind>::Wide) -> <N as NumericKind>::Wide + Send + Sync>;

/// Predicate the value must satisfy.
pub type Predicate<N> = Arc<dyn Fn(<N as NumericKind>::Native) -> bool + Send + Sync>;

/// Post-validation remap producing the final argument value.
pub type Transform<N> = Arc<dyn Fn(<N as NumericKind>::Native) -> Value + Send + Sync>;

/// Shared error strategy.
pub type SharedErrorHandler<N> = Arc<dyn ErrorHandler<<N as NumericKind>::Native>>;

/// Configuration of a numeric input scalar.
pub struct ScalarConfig<N: NumericKind> {
    /// Type name in the schema. Required.
    pub name: String,

    /// Description shown in introspection and SDL.
    pub description: Option<String>,

    /// Inclusive lower bound.
    pub min: Option<N::Native>,

    /// Inclusive upper bound.
    pub max: Option<N::Native>,

    /// Applied to the coerced value before any rule is checked.
    pub sanitize: Option<Sanitizer<N>>,

    /// Checked after `min` and `max`.
    pub test: Option<Predicate<N>>,

    /// Applied to the validated value; its result is the argument value.
    pub parse: Option<Transform<N>>,

    /// Decides what happens when `min`, `max` or `test` rejects a value.
    /// Default: raise a [`ScalarError`].
    pub error: Option<SharedErrorHandler<N>>,
}

impl<N: NumericKind> ScalarConfig<N> {
    /// Creates a configuration with only a name; no rule is applied.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            min: None,
            max: None,
            sanitize: None,
            test: None,
            parse: None,
            error: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the inclusive minimum.
    #[must_use]
    pub fn min(mut self, min: N::Native) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive maximum.
    #[must_use]
    pub fn max(mut self, max: N::Native) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the sanitize function.
    ///
    /// The function receives the coerced value in the family's wide type
    /// (`i64` for integers) and its result is checked against the family
    /// again, so doubling `2_000_000_000` is rejected instead of wrapping.
    #[must_use]
    pub fn sanitize<F, R>(mut self, sanitize: F) -> Self
    where
        F: Fn(N::Wide) -> R + Send + Sync + 'static,
        R: Into<N::Wide>,
    {
        self.sanitize = Some(Arc::new(move |n: N::Wide| -> N::Wide {
            sanitize(n).into()
        }));
        self
    }

    /// Sets the predicate.
    #[must_use]
    pub fn test<F>(mut self, test: F) -> Self
    where
        F: Fn(N::Native) -> bool + Send + Sync + 'static,
    {
        self.test = Some(Arc::new(test));
        self
    }

    /// Sets the post-validation transform.
    #[must_use]
    pub fn parse<F, R>(mut self, parse: F) -> Self
    where
        F: Fn(N::Native) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.parse = Some(Arc::new(move |n| -> Value { parse(n).into() }));
        self
    }

    /// Sets the error handler from a closure.
    #[must_use]
    pub fn error<F>(mut self, handler: F) -> Self
    where
        F: Fn(Violation<N::Native>) -> Result<Value, ScalarError> + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(handler));
        self
    }

    /// Sets the error handler from a strategy value.
    #[must_use]
    pub fn error_handler(mut self, handler: impl ErrorHandler<N::Native> + 'static) -> Self {
        self.error = Some(Arc::new(handler));
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is missing or not a GraphQL name, or if
    /// the bounds are unusable or inverted.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::MissingName);
        }
        if !NAME_REGEX.is_match(&self.name) {
            return Err(ConfigurationError::InvalidName(self.name.clone()));
        }

        for (bound, value) in [("min", self.min), ("max", self.max)] {
            if let Some(value) = value
                && !N::is_valid_bound(value)
            {
                return Err(ConfigurationError::InvalidBound {
                    scalar: self.name.clone(),
                    bound,
                    value: value.to_string(),
                });
            }
        }

        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(ConfigurationError::InvertedBounds {
                scalar: self.name.clone(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        Ok(())
    }

    /// Builds the scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if [`validate`](Self::validate) fails.
    pub fn build(self) -> Result<InputScalar<N>, ConfigurationError> {
        InputScalar::new(self)
    }
}

impl<N: NumericKind> Clone for ScalarConfig<N> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            min: self.min,
            max: self.max,
            sanitize: self.sanitize.clone(),
            test: self.test.clone(),
            parse: self.parse.clone(),
            error: self.error.clone(),
        }
    }
}

impl<N: NumericKind> fmt::Debug for ScalarConfig<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarConfig")
            .field("family", &N::FAMILY)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("sanitize", &self.sanitize.is_some())
            .field("test", &self.test.is_some())
            .field("parse", &self.parse.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
