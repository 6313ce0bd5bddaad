//! Numeric scalar families and their coercion rules.
//!
//! A family decides which GraphQL values reduce to its native number type.
//! Coercion is strict: an integer input must already be integral and inside
//! the 32-bit signed range, a float input must be finite. Nothing is rounded
//! or clamped.

use std::fmt;

use async_graphql::Value;

/// Smallest value accepted by the `Int` family.
pub const MIN_INT: i32 = i32::MIN;

/// Largest value accepted by the `Int` family.
pub const MAX_INT: i32 = i32::MAX;

/// A numeric scalar family (`Int` or `Float`).
///
/// The family owns every rule that depends on the number representation:
/// coercion of arbitrary GraphQL values, the check applied to sanitized
/// values, and the literal kinds accepted inline in a query.
pub trait NumericKind: Send + Sync + 'static {
    /// The number type handed to `test`, `parse` and error handlers.
    type Native: Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// The type a sanitize function receives and returns before its result
    /// is checked again.
    type Wide: Copy + fmt::Display + From<Self::Native>;

    /// Built-in GraphQL type this family mirrors.
    const FAMILY: &'static str;

    /// Coerces a GraphQL value, returning `None` when it is not representable.
    fn coerce(value: &Value) -> Option<Self::Native>;

    /// Checks a sanitized value against the family's rules.
    fn narrow(wide: Self::Wide) -> Option<Self::Native>;

    /// Returns `true` if an inline literal has a kind this family parses.
    fn is_literal_kind(literal: &Value) -> bool;

    /// Returns `true` if a configured bound is usable.
    fn is_valid_bound(bound: Self::Native) -> bool;

    /// Converts a native number back into a GraphQL value.
    fn to_value(native: Self::Native) -> Value;
}

/// The 32-bit signed integer family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int;

/// The finite double-precision float family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Float;

/// Reduces a GraphQL value to an `f64` the way a loose numeric conversion
/// would: numbers as-is, numeric strings parsed after trimming.
fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

fn safe_int(num: f64) -> Option<i32> {
    if num.is_finite()
        && num.fract() == 0.0
        && num >= f64::from(MIN_INT)
        && num <= f64::from(MAX_INT)
    {
        // integral and in range, so the cast is exact
        Some(num as i32)
    } else {
        None
    }
}

impl NumericKind for Int {
    type Native = i32;
    type Wide = i64;

    const FAMILY: &'static str = "Int";

    fn coerce(value: &Value) -> Option<i32> {
        if let Value::Number(n) = value
            && let Some(i) = n.as_i64()
        {
            return i32::try_from(i).ok();
        }
        to_number(value).and_then(safe_int)
    }

    fn narrow(wide: i64) -> Option<i32> {
        i32::try_from(wide).ok()
    }

    fn is_literal_kind(literal: &Value) -> bool {
        matches!(literal, Value::Number(n) if n.is_i64() || n.is_u64())
    }

    fn is_valid_bound(_bound: i32) -> bool {
        true
    }

    fn to_value(native: i32) -> Value {
        Value::from(native)
    }
}

impl NumericKind for Float {
    type Native = f64;
    type Wide = f64;

    const FAMILY: &'static str = "Float";

    fn coerce(value: &Value) -> Option<f64> {
        to_number(value).filter(|n| n.is_finite())
    }

    fn narrow(wide: f64) -> Option<f64> {
        wide.is_finite().then_some(wide)
    }

    fn is_literal_kind(literal: &Value) -> bool {
        matches!(literal, Value::Number(_))
    }

    fn is_valid_bound(bound: f64) -> bool {
        bound.is_finite()
    }

    fn to_value(native: f64) -> Value {
        Value::from(native)
    }
}
