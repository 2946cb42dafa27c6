//! Key construction shared by primary-key indexing and foreign-key lookups.

use serde_json::{Map, Number, Value};
use std::fmt;

/// A table row: a flat JSON object of column name to scalar or null.
pub type Record = Map<String, Value>;

/// One component of a key.
///
/// Numbers are normalized so that an integral float compares equal to the
/// integer it represents (`1.0 == 1`, `1e19 == 10000000000000000000`),
/// matching JSON value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Non-integral float, kept as its bit pattern
    Float(u64),
    Str(String),
}

impl Scalar {
    /// Convert a JSON value. Arrays and objects are not key material.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Self::Int(i);
        }
        if let Some(u) = n.as_u64() {
            return Self::UInt(u);
        }
        let f = n.as_f64().unwrap_or(f64::NAN);
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Self::Int(f as i64)
        } else if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 {
            Self::UInt(f as u64)
        } else {
            Self::Float(f.to_bits())
        }
    }

    /// Truthiness used by the single-column key policy: null, false, zero and
    /// the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::UInt(u) => *u != 0,
            Self::Float(bits) => f64::from_bits(*bits) != 0.0,
            Self::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::UInt(u) => write!(f, "{}", u),
            Self::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Self::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// A primary or foreign key value: one scalar per key column, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<Scalar>);

impl Key {
    pub fn new(parts: Vec<Scalar>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[Scalar] {
        &self.0
    }

    pub fn is_composite(&self) -> bool {
        self.0.len() > 1
    }

    /// Build the key `record` carries in `columns`.
    ///
    /// A single-column key whose value is missing or falsy yields `None`, so
    /// such records never enter an index and never match one. Composite keys
    /// are always built, with missing columns read as null. Any array or
    /// object component yields `None`.
    pub fn from_record(record: &Record, columns: &[String]) -> Option<Self> {
        let values: Vec<&Value> = columns
            .iter()
            .map(|c| record.get(c).unwrap_or(&Value::Null))
            .collect();
        Self::build(&values)
    }

    /// Build a key from explicit values, under the same policy as
    /// [`Key::from_record`].
    pub fn from_values(values: &[Value]) -> Option<Self> {
        let values: Vec<&Value> = values.iter().collect();
        Self::build(&values)
    }

    fn build(values: &[&Value]) -> Option<Self> {
        let parts = values
            .iter()
            .map(|v| Scalar::from_json(v))
            .collect::<Option<Vec<_>>>()?;

        match parts.as_slice() {
            [] => None,
            [single] if !single.is_truthy() => None,
            _ => Some(Self(parts)),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            parts => {
                write!(f, "(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_integral_float_equals_int() {
        let a = Key::from_values(&[json!(2024)]).unwrap();
        let b = Key::from_values(&[json!(2024.0)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Key::from_values(&[json!(2024.5)]).unwrap());
    }

    #[test]
    fn test_large_integral_float_equals_uint() {
        let a = Key::from_values(&[json!(10000000000000000000u64)]).unwrap();
        let b = Key::from_values(&[json!(1e19)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.parts(), &[Scalar::UInt(10000000000000000000)]);
        assert_eq!(
            Key::from_values(&[json!(9223372036854775808u64)]).unwrap(),
            Key::from_values(&[json!(9223372036854775808.0)]).unwrap()
        );
    }

    #[test]
    fn test_string_and_number_differ() {
        let a = Key::from_values(&[json!("1")]).unwrap();
        let b = Key::from_values(&[json!(1)]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_single_falsy_is_unkeyed() {
        let columns = cols(&["id"]);
        assert!(Key::from_record(&record(json!({})), &columns).is_none());
        assert!(Key::from_record(&record(json!({"id": null})), &columns).is_none());
        assert!(Key::from_record(&record(json!({"id": 0})), &columns).is_none());
        assert!(Key::from_record(&record(json!({"id": ""})), &columns).is_none());
        assert!(Key::from_record(&record(json!({"id": false})), &columns).is_none());
        assert!(Key::from_record(&record(json!({"id": "A1"})), &columns).is_some());
    }

    #[test]
    fn test_composite_keeps_nulls() {
        let key = Key::from_record(&record(json!({"a": 1})), &cols(&["a", "b"])).unwrap();
        assert!(key.is_composite());
        assert_eq!(key.parts(), &[Scalar::Int(1), Scalar::Null]);
    }

    #[test]
    fn test_non_scalar_is_unkeyed() {
        let columns = cols(&["a", "b"]);
        assert!(Key::from_record(&record(json!({"a": 1, "b": [1]})), &columns).is_none());
    }

    #[test]
    fn test_display() {
        let key = Key::from_values(&[json!("x"), json!(2), json!(null)]).unwrap();
        assert_eq!(key.to_string(), r#"("x", 2, null)"#);
        assert_eq!(Key::from_values(&[json!(7)]).unwrap().to_string(), "7");
    }
}
