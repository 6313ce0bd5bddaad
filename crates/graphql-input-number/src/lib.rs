//! # graphql-input-number
//!
//! Numeric input scalars for async-graphql with declarative validation.
//!
//! Each scalar wraps GraphQL's `Int` or `Float` and adds rules that run when
//! a value arrives as input:
//!
//! - `sanitize` remaps the coerced number before validation
//! - `min` / `max` reject values outside an inclusive range
//! - `test` rejects values failing a predicate
//! - `parse` remaps the validated number into the final argument value
//! - `error` decides whether a rejected value raises or is substituted
//!
//! Output values are only coerced; no rule applies on serialization.
//!
//! ## Example
//!
//! ```ignore
//! use graphql_input_number::{ScalarConfig, input_int};
//!
//! let age = input_int(
//!     ScalarConfig::new("Age")
//!         .description("Age in whole years")
//!         .min(0)
//!         .max(150),
//! )?;
//!
//! let schema = Schema::build("Query", None, None)
//!     .register(age.to_dynamic())
//!     // ...
//!     .finish()?;
//! ```
//!
//! ## Declarative scalars
//!
//! Scalars that only need bounds can be declared in TOML and loaded with
//! [`ScalarsConfig`]:
//!
//! ```toml
//! [[scalar]]
//! kind = "int"
//! name = "Percentage"
//! min = 0
//! max = 100
//! ```
//!
//! ## Modules
//!
//! - [`kind`] - Numeric families and coercion
//! - [`config`] - Scalar configuration
//! - [`handler`] - Rule violations and error strategies
//! - [`scalar`] - Scalar descriptors and factories
//! - [`dynamic`] - async-graphql dynamic schema integration
//! - [`registry`] - TOML definitions and the scalar registry
//! - [`error`] - Error types

pub mod config;
pub mod dynamic;
pub mod error;
pub mod handler;
pub mod kind;
pub mod registry;
pub mod scalar;

// Re-export main types
pub use config::ScalarConfig;
pub use error::{ConfigurationError, ErrorKind, ScalarError};
pub use handler::{DefaultErrorHandler, ErrorHandler, Rule, Violation};
pub use kind::{Float, Int, NumericKind};
pub use registry::{AnyScalar, ScalarDefinition, ScalarRegistry, ScalarsConfig};
pub use scalar::{InputFloat, InputInt, InputScalar, input_float, input_int};

/// Result type for scalar construction.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
