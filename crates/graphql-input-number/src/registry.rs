//! Declarative scalar definitions and the registry of built scalars.
//!
//! Scalars whose rules are plain bounds can be declared in TOML instead of
//! code:
//!
//! ```toml
//! [[scalar]]
//! kind = "int"
//! name = "Percentage"
//! description = "A whole percentage"
//! min = 0
//! max = 100
//!
//! [[scalar]]
//! kind = "float"
//! name = "Latitude"
//! min = -90.0
//! max = 90.0
//! ```
//!
//! [`ScalarRegistry`] holds built scalars by name, whether declared in TOML
//! or built in code with closures, and registers them all with a schema.

use std::collections::BTreeMap;
use std::path::Path;

use async_graphql::dynamic::{InputValue, ResolverContext, SchemaBuilder};
use async_graphql::{Pos, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScalarConfig;
use crate::error::{ConfigurationError, ScalarError};
use crate::kind::{Float, Int};
use crate::scalar::{InputFloat, InputInt};

/// A scalar declared in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScalarDefinition {
    /// An integer scalar.
    Int {
        /// Type name.
        name: String,
        /// Description shown in the schema.
        #[serde(default)]
        description: Option<String>,
        /// Inclusive minimum.
        #[serde(default)]
        min: Option<i32>,
        /// Inclusive maximum.
        #[serde(default)]
        max: Option<i32>,
    },
    /// A float scalar.
    Float {
        /// Type name.
        name: String,
        /// Description shown in the schema.
        #[serde(default)]
        description: Option<String>,
        /// Inclusive minimum.
        #[serde(default)]
        min: Option<f64>,
        /// Inclusive maximum.
        #[serde(default)]
        max: Option<f64>,
    },
}

impl ScalarDefinition {
    /// Type name of the declared scalar.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Int { name, .. } | Self::Float { name, .. } => name,
        }
    }

    /// Builds the declared scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if the declared configuration is invalid.
    pub fn build(&self) -> Result<AnyScalar, ConfigurationError> {
        match self {
            Self::Int {
                name,
                description,
                min,
                max,
            } => {
                let mut config = ScalarConfig::<Int>::new(name.clone());
                config.description = description.clone();
                config.min = *min;
                config.max = *max;
                config.build().map(AnyScalar::Int)
            }
            Self::Float {
                name,
                description,
                min,
                max,
            } => {
                let mut config = ScalarConfig::<Float>::new(name.clone());
                config.description = description.clone();
                config.min = *min;
                config.max = *max;
                config.build().map(AnyScalar::Float)
            }
        }
    }
}

/// A file of scalar definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarsConfig {
    /// Declared scalars, in file order.
    #[serde(default, rename = "scalar")]
    pub scalars: Vec<ScalarDefinition>,
}

impl ScalarsConfig {
    /// Parses definitions from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML does not match the expected shape.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(toml)?)
    }

    /// Reads definitions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading scalar definitions");
        Self::from_toml_str(&content)
    }

    /// Validates every definition without keeping the built scalars.
    ///
    /// # Errors
    ///
    /// Returns the first invalid definition's error, or a duplicate name.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.build().map(|_| ())
    }

    /// Builds every definition into a registry.
    ///
    /// # Errors
    ///
    /// Returns the first invalid definition's error, or a duplicate name.
    pub fn build(&self) -> Result<ScalarRegistry, ConfigurationError> {
        let mut registry = ScalarRegistry::new();
        for definition in &self.scalars {
            registry.insert(definition.build()?)?;
        }
        Ok(registry)
    }
}

/// An input scalar of either family.
#[derive(Debug, Clone)]
pub enum AnyScalar {
    /// Integer scalar.
    Int(InputInt),
    /// Float scalar.
    Float(InputFloat),
}

impl AnyScalar {
    /// Type name in the schema.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Int(s) => s.name(),
            Self::Float(s) => s.name(),
        }
    }

    /// Description, if configured.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Int(s) => s.description(),
            Self::Float(s) => s.description(),
        }
    }

    /// See [`InputScalar::serialize`](crate::InputScalar::serialize).
    #[must_use]
    pub fn serialize(&self, value: &Value) -> Value {
        match self {
            Self::Int(s) => s.serialize(value),
            Self::Float(s) => s.serialize(value),
        }
    }

    /// See [`InputScalar::parse_value`](crate::InputScalar::parse_value).
    ///
    /// # Errors
    ///
    /// Returns the scalar's error for rejected values.
    pub fn parse_value(&self, value: &Value) -> Result<Value, ScalarError> {
        match self {
            Self::Int(s) => s.parse_value(value),
            Self::Float(s) => s.parse_value(value),
        }
    }

    /// See [`InputScalar::parse_literal`](crate::InputScalar::parse_literal).
    ///
    /// # Errors
    ///
    /// Returns the scalar's error for rejected literals.
    pub fn parse_literal(&self, literal: &Value, pos: Option<Pos>) -> Result<Value, ScalarError> {
        match self {
            Self::Int(s) => s.parse_literal(literal, pos),
            Self::Float(s) => s.parse_literal(literal, pos),
        }
    }

    /// Declares a nullable argument of this scalar type.
    #[must_use]
    pub fn argument(&self, name: &str) -> InputValue {
        match self {
            Self::Int(s) => s.argument(name),
            Self::Float(s) => s.argument(name),
        }
    }

    /// Declares a non-null argument of this scalar type.
    #[must_use]
    pub fn required_argument(&self, name: &str) -> InputValue {
        match self {
            Self::Int(s) => s.required_argument(name),
            Self::Float(s) => s.required_argument(name),
        }
    }

    /// See [`InputScalar::resolve_argument`](crate::InputScalar::resolve_argument).
    ///
    /// # Errors
    ///
    /// Returns the scalar's error for rejected values.
    pub fn resolve_argument(
        &self,
        ctx: &ResolverContext<'_>,
        name: &str,
    ) -> async_graphql::Result<Value> {
        match self {
            Self::Int(s) => s.resolve_argument(ctx, name),
            Self::Float(s) => s.resolve_argument(ctx, name),
        }
    }

    /// See [`InputScalar::to_dynamic`](crate::InputScalar::to_dynamic).
    #[must_use]
    pub fn to_dynamic(&self) -> async_graphql::dynamic::Scalar {
        match self {
            Self::Int(s) => s.to_dynamic(),
            Self::Float(s) => s.to_dynamic(),
        }
    }
}

impl From<InputInt> for AnyScalar {
    fn from(scalar: InputInt) -> Self {
        Self::Int(scalar)
    }
}

impl From<InputFloat> for AnyScalar {
    fn from(scalar: InputFloat) -> Self {
        Self::Float(scalar)
    }
}

/// Built scalars by name.
#[derive(Debug, Clone, Default)]
pub struct ScalarRegistry {
    scalars: BTreeMap<String, AnyScalar>,
}

impl ScalarRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if a scalar with the same name is already present.
    pub fn insert(&mut self, scalar: impl Into<AnyScalar>) -> Result<(), ConfigurationError> {
        let scalar = scalar.into();
        let name = scalar.name().to_string();
        if self.scalars.contains_key(&name) {
            return Err(ConfigurationError::DuplicateName(name));
        }
        self.scalars.insert(name, scalar);
        Ok(())
    }

    /// Looks up a scalar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnyScalar> {
        self.scalars.get(name)
    }

    /// Number of scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Returns `true` if the registry holds no scalars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Iterates scalars in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AnyScalar> {
        self.scalars.values()
    }

    /// Registers every scalar type with a dynamic schema builder.
    #[must_use]
    pub fn register(&self, builder: SchemaBuilder) -> SchemaBuilder {
        let mut builder = builder;
        for scalar in self.scalars.values() {
            builder = builder.register(scalar.to_dynamic());
        }
        debug!(count = self.scalars.len(), "Registered input scalars");
        builder
    }
}
