//! Rule violations and the strategy that decides what happens to them.
//!
//! When `min`, `max` or `test` rejects a value, the scalar builds a
//! [`Violation`] and hands it to its [`ErrorHandler`]. The default handler
//! turns it into a [`ScalarError`]. A custom handler may instead return a
//! substitute value, which then becomes the parsed argument.

use std::fmt;

use async_graphql::{Pos, Value};

use crate::error::ScalarError;

/// The rule that rejected a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule<T> {
    /// Value was below this minimum.
    Min(T),
    /// Value was above this maximum.
    Max(T),
    /// The `test` predicate returned `false`.
    Test,
}

impl<T> Rule<T> {
    /// Short rule name: `"min"`, `"max"` or `"test"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Test => "test",
        }
    }
}

/// A value rejected by one of the scalar's rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation<T> {
    /// Name of the scalar that rejected the value.
    pub scalar: String,
    /// Which rule failed.
    pub rule: Rule<T>,
    /// The value after coercion and sanitization.
    pub value: T,
    /// Human readable reason, `None` for predicate failures.
    pub message: Option<String>,
    /// Position of the literal in the query, when parsed from a literal.
    pub pos: Option<Pos>,
}

impl<T: Copy + fmt::Display> Violation<T> {
    pub(crate) fn new(scalar: &str, rule: Rule<T>, value: T, pos: Option<Pos>) -> Self {
        let message = match rule {
            Rule::Min(min) => Some(format!("Expected minimum \"{min}\"")),
            Rule::Max(max) => Some(format!("Expected maximum \"{max}\"")),
            Rule::Test => None,
        };
        Self {
            scalar: scalar.to_string(),
            rule,
            value,
            message,
            pos,
        }
    }

    /// Converts the violation into the error raised by default.
    #[must_use]
    pub fn into_error(self) -> ScalarError {
        let value = self.value.to_string();
        match self.rule {
            Rule::Min(min) => ScalarError::BelowMinimum {
                scalar: self.scalar,
                value,
                min: min.to_string(),
            },
            Rule::Max(max) => ScalarError::AboveMaximum {
                scalar: self.scalar,
                value,
                max: max.to_string(),
            },
            Rule::Test => ScalarError::Validation {
                scalar: self.scalar,
                value,
            },
        }
    }
}

/// Strategy invoked when a rule rejects a value.
///
/// Returning `Ok` substitutes the returned value for the argument; returning
/// `Err` reports the error for the field.
pub trait ErrorHandler<T>: Send + Sync {
    /// Handles a rule violation.
    fn handle(&self, violation: Violation<T>) -> Result<Value, ScalarError>;
}

impl<T, F> ErrorHandler<T> for F
where
    F: Fn(Violation<T>) -> Result<Value, ScalarError> + Send + Sync,
{
    fn handle(&self, violation: Violation<T>) -> Result<Value, ScalarError> {
        self(violation)
    }
}

/// Handler used when none is configured: every violation is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl<T: Copy + fmt::Display> ErrorHandler<T> for DefaultErrorHandler {
    fn handle(&self, violation: Violation<T>) -> Result<Value, ScalarError> {
        Err(violation.into_error())
    }
}
