//! Input scalar descriptors.
//!
//! An [`InputScalar`] holds the three behaviours a schema needs from a custom
//! scalar:
//!
//! - `serialize` (output): bare coercion, no rule is applied
//! - `parse_value` (input from variables): the full pipeline
//! - `parse_literal` (input written inline): the full pipeline, only for
//!   literals of a kind the family accepts
//!
//! The input pipeline runs in a fixed order and stops at the first failure:
//! coerce, sanitize, `min`, `max`, `test`, `parse`.

use std::fmt;
use std::sync::Arc;

use async_graphql::{Pos, Value};
use tracing::{debug, trace};

use crate::config::ScalarConfig;
use crate::error::{ConfigurationError, ScalarError};
use crate::handler::{DefaultErrorHandler, ErrorHandler, Rule, Violation};
use crate::kind::{Float, Int, NumericKind};

/// A built numeric input scalar.
///
/// Cloning is cheap; clones share the same immutable configuration.
pub struct InputScalar<N: NumericKind> {
    config: Arc<ScalarConfig<N>>,
}

/// Integer input scalar.
pub type InputInt = InputScalar<Int>;

/// Float input scalar.
pub type InputFloat = InputScalar<Float>;

/// Builds an integer input scalar.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn input_int(config: ScalarConfig<Int>) -> Result<InputInt, ConfigurationError> {
    InputScalar::new(config)
}

/// Builds a float input scalar.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn input_float(config: ScalarConfig<Float>) -> Result<InputFloat, ConfigurationError> {
    InputScalar::new(config)
}

impl<N: NumericKind> InputScalar<N> {
    /// Validates the configuration and builds the scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is missing or invalid, or the bounds are
    /// unusable.
    pub fn new(config: ScalarConfig<N>) -> Result<Self, ConfigurationError> {
        config.validate()?;

        debug!(
            name = %config.name,
            family = N::FAMILY,
            min = ?config.min,
            max = ?config.max,
            "Built input scalar"
        );

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Type name in the schema.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Description, if configured.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    /// The configuration this scalar was built from.
    #[must_use]
    pub fn config(&self) -> &ScalarConfig<N> {
        &self.config
    }

    /// Coerces an output value. Returns `Value::Null` if it is not a number
    /// of this family. No rule is applied.
    #[must_use]
    pub fn serialize(&self, value: &Value) -> Value {
        N::coerce(value).map_or(Value::Null, N::to_value)
    }

    /// Parses a value supplied through a variable.
    ///
    /// `null` passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ScalarError`] if the value cannot be coerced or a rule
    /// rejects it and the error handler does not substitute a value.
    pub fn parse_value(&self, value: &Value) -> Result<Value, ScalarError> {
        if matches!(value, Value::Null) {
            return Ok(Value::Null);
        }
        let number = N::coerce(value).ok_or_else(|| self.type_error(value))?;
        self.validate(number, None)
    }

    /// Parses a value written inline in the query.
    ///
    /// Only literals of a kind the family accepts are parsed: integers for
    /// `Int`, integers and floats for `Float`. `null` passes through.
    ///
    /// # Errors
    ///
    /// Returns a [`ScalarError`] if the literal has the wrong kind, cannot be
    /// coerced, or a rule rejects it and the error handler does not
    /// substitute a value.
    pub fn parse_literal(&self, literal: &Value, pos: Option<Pos>) -> Result<Value, ScalarError> {
        if matches!(literal, Value::Null) {
            return Ok(Value::Null);
        }
        if !N::is_literal_kind(literal) {
            trace!(scalar = %self.name(), literal = %literal, "Literal kind rejected");
            return Err(self.type_error(literal));
        }
        let number = N::coerce(literal).ok_or_else(|| self.type_error(literal))?;
        self.validate(number, pos)
    }

    fn validate(&self, number: N::Native, pos: Option<Pos>) -> Result<Value, ScalarError> {
        let config = &*self.config;

        let number = match &config.sanitize {
            Some(sanitize) => {
                let wide = sanitize(N::Wide::from(number));
                trace!(scalar = %config.name, from = %number, to = %wide, "Sanitized value");
                N::narrow(wide).ok_or_else(|| ScalarError::Type {
                    scalar: config.name.clone(),
                    value: wide.to_string(),
                })?
            }
            None => number,
        };

        if let Some(min) = config.min
            && number < min
        {
            return self.violation(Rule::Min(min), number, pos);
        }

        if let Some(max) = config.max
            && number > max
        {
            return self.violation(Rule::Max(max), number, pos);
        }

        if let Some(test) = &config.test
            && !test(number)
        {
            return self.violation(Rule::Test, number, pos);
        }

        match &config.parse {
            Some(parse) => {
                let parsed = parse(number);
                trace!(scalar = %config.name, value = %number, parsed = %parsed, "Parsed value");
                Ok(parsed)
            }
            None => Ok(N::to_value(number)),
        }
    }

    fn violation(
        &self,
        rule: Rule<N::Native>,
        number: N::Native,
        pos: Option<Pos>,
    ) -> Result<Value, ScalarError> {
        debug!(
            scalar = %self.config.name,
            rule = rule.name(),
            value = %number,
            "Input value rejected"
        );
        let violation = Violation::new(&self.config.name, rule, number, pos);
        match &self.config.error {
            Some(handler) => handler.handle(violation),
            None => DefaultErrorHandler.handle(violation),
        }
    }

    fn type_error(&self, value: &Value) -> ScalarError {
        ScalarError::Type {
            scalar: self.config.name.clone(),
            value: value.to_string(),
        }
    }
}

impl<N: NumericKind> Clone for InputScalar<N> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
        }
    }
}

impl<N: NumericKind> fmt::Debug for InputScalar<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputScalar")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_graphql::Number;

    fn float(f: f64) -> Value {
        Value::Number(Number::from_f64(f).unwrap())
    }

    fn int_scalar(config: ScalarConfig<Int>) -> InputInt {
        input_int(config).expect("valid config")
    }

    fn float_scalar(config: ScalarConfig<Float>) -> InputFloat {
        input_float(config).expect("valid config")
    }

    #[test]
    fn test_identity_without_rules() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("Plain"));
        for v in [i32::MIN, -1, 0, 1, 42, i32::MAX] {
            assert_eq!(scalar.parse_value(&Value::from(v)), Ok(Value::from(v)));
            assert_eq!(scalar.serialize(&Value::from(v)), Value::from(v));
        }
    }

    #[test]
    fn test_non_integral_is_type_error() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("NonInt"));
        for value in [
            float(3.5),
            Value::from(2147483648i64),
            Value::String("3.1".into()),
            Value::Boolean(true),
        ] {
            let err = scalar.parse_value(&value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeError, "value: {value}");
        }
    }

    #[test]
    fn test_null_passes_through() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("Nullable").min(3).test(|_| false));
        assert_eq!(scalar.parse_value(&Value::Null), Ok(Value::Null));
        assert_eq!(scalar.parse_literal(&Value::Null, None), Ok(Value::Null));
        assert_eq!(scalar.serialize(&Value::Null), Value::Null);
    }

    #[test]
    fn test_min_boundary() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("min").min(3));
        assert_eq!(scalar.parse_value(&Value::from(3)), Ok(Value::from(3)));

        let err = scalar.parse_value(&Value::from(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert_eq!(err.to_string(), "Invalid value 2. Expected minimum \"3\".");
    }

    #[test]
    fn test_max_boundary() {
        let scalar = float_scalar(ScalarConfig::<Float>::new("max").max(5.0));
        assert_eq!(scalar.parse_value(&float(5.0)), Ok(float(5.0)));
        assert_eq!(scalar.parse_value(&float(4.9)), Ok(float(4.9)));

        let err = scalar.parse_value(&float(5.1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert!(err.to_string().contains("maximum \"5\""));
    }

    #[test]
    fn test_predicate() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("Small").test(|x| x < 3));
        assert_eq!(scalar.parse_value(&Value::from(2)), Ok(Value::from(2)));

        let err = scalar.parse_value(&Value::from(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.to_string(), "Invalid value 3.");
    }

    #[test]
    fn test_sanitize_runs_before_rules() {
        // 2 doubled is 4, which clears the minimum
        let scalar = int_scalar(ScalarConfig::<Int>::new("Doubled").sanitize(|x| x * 2).min(3));
        assert_eq!(scalar.parse_value(&Value::from(2)), Ok(Value::from(4)));

        let halved = float_scalar(ScalarConfig::<Float>::new("Halved").sanitize(|x| x / 2.0));
        assert_eq!(halved.parse_value(&float(3.0)), Ok(float(1.5)));
    }

    #[test]
    fn test_sanitize_out_of_family_is_type_error() {
        let scalar = int_scalar(
            ScalarConfig::<Int>::new("Overflow").sanitize(|x| x * 1_000_000_000),
        );
        let err = scalar.parse_value(&Value::from(10)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);

        let doubled = int_scalar(ScalarConfig::<Int>::new("Doubled").sanitize(|x| 2 * x));
        assert_eq!(
            doubled.parse_value(&Value::from(1_000_000_000)),
            Ok(Value::from(2_000_000_000))
        );
        let err = doubled.parse_value(&Value::from(2_000_000_000)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
        assert_eq!(
            err.to_string(),
            "Invalid value 4000000000. Expected type \"Doubled\"."
        );
        let err = doubled.parse_value(&Value::from(i32::MIN)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);

        let scalar = float_scalar(ScalarConfig::<Float>::new("Infinite").sanitize(|x| x / 0.0));
        let err = scalar.parse_value(&float(1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_parse_runs_last() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("parse").max(5).parse(|x| x * 2));
        assert_eq!(scalar.parse_value(&Value::from(3)), Ok(Value::from(6)));
        // max is checked against the value before parse
        assert_eq!(scalar.parse_value(&Value::from(5)), Ok(Value::from(10)));
        assert!(scalar.parse_value(&Value::from(6)).is_err());
    }

    #[test]
    fn test_parse_may_change_type() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("Cents").parse(|x| format!("{x}c")));
        assert_eq!(
            scalar.parse_value(&Value::from(250)),
            Ok(Value::String("250c".into()))
        );
    }

    #[test]
    fn test_serialize_ignores_rules() {
        let scalar = int_scalar(
            ScalarConfig::<Int>::new("output")
                .min(10)
                .test(|_| false)
                .sanitize(|x| x + 1)
                .parse(|x| x * 2),
        );
        assert_eq!(scalar.serialize(&Value::from(3)), Value::from(3));
        assert_eq!(scalar.serialize(&float(3.5)), Value::Null);
        assert_eq!(scalar.serialize(&Value::String("x".into())), Value::Null);

        let scalar = float_scalar(ScalarConfig::<Float>::new("output").parse(|x| x * 2.0));
        assert_eq!(scalar.serialize(&float(3.1)), float(3.1));
    }

    #[test]
    fn test_error_handler_substitutes_value() {
        let scalar = int_scalar(
            ScalarConfig::<Int>::new("error")
                .min(3)
                .error(|err| Ok(Value::from(err.value - 3))),
        );
        assert_eq!(scalar.parse_value(&Value::from(2)), Ok(Value::from(-1)));
    }

    #[test]
    fn test_error_handler_receives_payload() {
        let scalar = float_scalar(ScalarConfig::<Float>::new("Ratio").max(1.0).error(|err| {
            assert_eq!(err.scalar, "Ratio");
            assert_eq!(err.rule, Rule::Max(1.0));
            assert_eq!(err.value, 1.5);
            assert_eq!(err.message.as_deref(), Some("Expected maximum \"1\""));
            assert_eq!(err.pos, Some(Pos { line: 1, column: 9 }));
            Err(ScalarError::custom(err.scalar, err.value, "Ratio must not exceed 1"))
        }));
        let err = scalar
            .parse_literal(&float(1.5), Some(Pos { line: 1, column: 9 }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value 1.5. Ratio must not exceed 1.");
    }

    #[test]
    fn test_error_handler_not_called_for_type_errors() {
        let scalar = int_scalar(
            ScalarConfig::<Int>::new("Strict").error(|_| panic!("handler must not run")),
        );
        assert!(scalar.parse_value(&Value::String("nope".into())).is_err());
    }

    #[test]
    fn test_literal_kind() {
        let int = int_scalar(ScalarConfig::<Int>::new("LiteralInt"));
        assert_eq!(int.parse_literal(&Value::from(3), None), Ok(Value::from(3)));
        assert_eq!(
            int.parse_literal(&float(3.0), None).unwrap_err().kind(),
            ErrorKind::TypeError
        );
        assert_eq!(
            int.parse_literal(&Value::String("3".into()), None)
                .unwrap_err()
                .kind(),
            ErrorKind::TypeError
        );

        let float_lit = float_scalar(ScalarConfig::<Float>::new("LiteralFloat"));
        assert_eq!(
            float_lit.parse_literal(&Value::from(3), None),
            Ok(float(3.0))
        );
        assert_eq!(
            float_lit.parse_literal(&float(3.1), None),
            Ok(float(3.1))
        );
    }

    #[test]
    fn test_numeric_strings_as_variables() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("Loose").max(10));
        assert_eq!(
            scalar.parse_value(&Value::String("7".into())),
            Ok(Value::from(7))
        );
        assert!(scalar.parse_value(&Value::String("11".into())).is_err());
    }

    #[test]
    fn test_missing_name_fails_construction() {
        assert!(matches!(
            input_int(ScalarConfig::new("")),
            Err(ConfigurationError::MissingName)
        ));
        assert!(matches!(
            input_float(ScalarConfig::new("")),
            Err(ConfigurationError::MissingName)
        ));
    }

    #[test]
    fn test_scalar_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InputInt>();
        assert_send_sync::<InputFloat>();
    }

    #[test]
    fn test_clone_shares_config() {
        let scalar = int_scalar(ScalarConfig::<Int>::new("Shared").description("shared"));
        let clone = scalar.clone();
        assert_eq!(clone.name(), "Shared");
        assert_eq!(clone.description(), Some("shared"));
        assert!(Arc::ptr_eq(&scalar.config, &clone.config));
    }
}
