//! async-graphql dynamic schema integration.
//!
//! The host engine owns schema construction and execution. This module only
//! provides what a schema author needs to wire an [`InputScalar`] in:
//!
//! - [`InputScalar::to_dynamic`] registers the scalar type
//! - [`InputScalar::argument`] declares an argument of that type
//! - [`InputScalar::resolve_argument`] runs the input pipeline inside a
//!   resolver, choosing literal or variable parsing from the query syntax
//!
//! # Example
//!
//! ```ignore
//! let percentage = ScalarConfig::<Int>::new("Percentage").min(0).max(100).build()?;
//! let arg_scalar = percentage.clone();
//!
//! let query = Object::new("Query").field(
//!     Field::new("progress", TypeRef::named(TypeRef::INT), move |ctx| {
//!         let scalar = arg_scalar.clone();
//!         FieldFuture::new(async move {
//!             let value = scalar.resolve_argument(&ctx, "value")?;
//!             Ok(Some(value))
//!         })
//!     })
//!     .argument(percentage.argument("value")),
//! );
//!
//! let schema = Schema::build("Query", None, None)
//!     .register(percentage.to_dynamic())
//!     .register(query)
//!     .finish()?;
//! ```

use async_graphql::dynamic::{InputValue, ResolverContext, Scalar, TypeRef};
use async_graphql::{ErrorExtensions, Value};
use async_graphql_value::Value as LiteralValue;
use tracing::trace;

use crate::kind::NumericKind;
use crate::scalar::InputScalar;

impl<N: NumericKind> InputScalar<N> {
    /// Builds the dynamic scalar type to register with a `SchemaBuilder`.
    ///
    /// No validator is installed: every argument value reaches
    /// [`resolve_argument`](Self::resolve_argument), so values that are not
    /// numbers of this family fail only their own field, with a typed
    /// error, instead of the whole operation.
    #[must_use]
    pub fn to_dynamic(&self) -> Scalar {
        let mut scalar = Scalar::new(self.name());
        if let Some(description) = self.description() {
            scalar = scalar.description(description);
        }
        scalar
    }

    /// Declares a nullable argument of this scalar type.
    #[must_use]
    pub fn argument(&self, name: &str) -> InputValue {
        InputValue::new(name, TypeRef::named(self.name()))
    }

    /// Declares a non-null argument of this scalar type.
    #[must_use]
    pub fn required_argument(&self, name: &str) -> InputValue {
        InputValue::new(name, TypeRef::named_nn(self.name()))
    }

    /// Parses an argument of the field being resolved.
    ///
    /// Inline literals go through [`parse_literal`](Self::parse_literal) with
    /// the literal's position; arguments bound to variables go through
    /// [`parse_value`](Self::parse_value). A missing argument resolves to
    /// `null`.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ScalarError`](crate::ScalarError) as a
    /// GraphQL error with `code`, `kind` and `scalar` extensions.
    pub fn resolve_argument(
        &self,
        ctx: &ResolverContext<'_>,
        name: &str,
    ) -> async_graphql::Result<Value> {
        let Some(accessor) = ctx.args.get(name) else {
            return Ok(Value::Null);
        };
        let value = accessor.as_value();

        let result = match ctx.ctx.item.node.get_argument(name) {
            Some(literal) if !matches!(literal.node, LiteralValue::Variable(_)) => {
                trace!(scalar = %self.name(), argument = name, "Parsing literal argument");
                self.parse_literal(value, Some(literal.pos))
            }
            _ => {
                trace!(scalar = %self.name(), argument = name, "Parsing variable argument");
                self.parse_value(value)
            }
        };

        result.map_err(|e| e.extend())
    }
}

