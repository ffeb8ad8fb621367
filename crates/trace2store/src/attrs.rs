//! Normalization of typed key/value attributes into a dynamic mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spanmodel::{Array, KeyValue, Value};

/// Attribute name to value.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A dynamically typed attribute value, persisted as its plain JSON form.
///
/// Byte strings are written as arrays of numbers and read back as
/// [`AttributeValue::List`]. Non-finite floats, which JSON numbers cannot
/// hold, are written as `{"Float": "NaN"}`, `{"Float": "Infinity"}` or
/// `{"Float": "-Infinity"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "float_repr")] f64),
    String(String),
    List(Vec<AttributeValue>),
    Bytes(Vec<u8>),
}

impl From<&Value> for AttributeValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::I64(i) => AttributeValue::Int(*i),
            Value::F64(f) => AttributeValue::Float(*f),
            Value::String(s) => AttributeValue::String(s.clone()),
            Value::Bytes(b) => AttributeValue::Bytes(b.clone()),
            Value::Array(arr) => AttributeValue::List(array_values(arr)),
        }
    }
}

mod float_repr {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    enum NonFinite {
        NaN,
        Infinity,
        #[serde(rename = "-Infinity")]
        NegInfinity,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        NonFinite {
            #[serde(rename = "Float")]
            float: NonFinite,
        },
    }

    pub fn serialize<S: Serializer>(f: &f64, s: S) -> Result<S::Ok, S::Error> {
        let repr = if f.is_nan() {
            Repr::NonFinite {
                float: NonFinite::NaN,
            }
        } else if *f == f64::INFINITY {
            Repr::NonFinite {
                float: NonFinite::Infinity,
            }
        } else if *f == f64::NEG_INFINITY {
            Repr::NonFinite {
                float: NonFinite::NegInfinity,
            }
        } else {
            Repr::Finite(*f)
        };
        repr.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match Repr::deserialize(d)? {
            Repr::Finite(f) => f,
            Repr::NonFinite { float } => match float {
                NonFinite::NaN => f64::NAN,
                NonFinite::Infinity => f64::INFINITY,
                NonFinite::NegInfinity => f64::NEG_INFINITY,
            },
        })
    }
}

fn array_values(arr: &Array) -> Vec<AttributeValue> {
    match arr {
        Array::Bool(v) => v.iter().copied().map(AttributeValue::Bool).collect(),
        Array::I64(v) => v.iter().copied().map(AttributeValue::Int).collect(),
        Array::F64(v) => v.iter().copied().map(AttributeValue::Float).collect(),
        Array::String(v) => v.iter().cloned().map(AttributeValue::String).collect(),
    }
}

/// Converts an attribute list into a mapping. Later duplicates of a key
/// replace earlier ones.
pub fn normalize(attrs: &[KeyValue]) -> Attributes {
    attrs
        .iter()
        .map(|kv| (kv.key.clone(), AttributeValue::from(&kv.value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_normalize_scalars() {
        let attrs = normalize(&[
            KeyValue::string("s", "v"),
            KeyValue::i64("i", -3),
            KeyValue::f64("f", 1.5),
            KeyValue::bool("b", true),
            KeyValue::new("bytes", Value::Bytes(vec![1, 2])),
        ]);
        assert_eq!(attrs["s"], AttributeValue::String("v".to_string()));
        assert_eq!(attrs["i"], AttributeValue::Int(-3));
        assert_eq!(attrs["f"], AttributeValue::Float(1.5));
        assert_eq!(attrs["b"], AttributeValue::Bool(true));
        assert_eq!(attrs["bytes"], AttributeValue::Bytes(vec![1, 2]));
    }

    #[test]
    fn test_normalize_arrays() {
        let attrs = normalize(&[KeyValue::new(
            "tags",
            Value::Array(Array::String(vec!["a".to_string(), "b".to_string()])),
        )]);
        assert_eq!(
            attrs["tags"],
            AttributeValue::List(vec![
                AttributeValue::String("a".to_string()),
                AttributeValue::String("b".to_string()),
            ])
        );
    }

    #[test]
    fn test_normalize_last_duplicate_wins() {
        let attrs = normalize(&[
            KeyValue::i64("k", 1),
            KeyValue::string("other", "x"),
            KeyValue::i64("k", 2),
        ]);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["k"], AttributeValue::Int(2));
    }

    #[test]
    fn test_attribute_value_json() {
        let attrs = normalize(&[
            KeyValue::i64("i", 7),
            KeyValue::new("l", Value::Array(Array::Bool(vec![true, false]))),
            KeyValue::string("s", "x"),
        ]);
        assert_eq!(
            serde_json::to_value(&attrs).unwrap(),
            json!({"i": 7, "l": [true, false], "s": "x"})
        );
    }

    #[test]
    fn test_non_finite_floats_roundtrip() {
        let attrs = normalize(&[
            KeyValue::f64("nan", f64::NAN),
            KeyValue::f64("inf", f64::INFINITY),
            KeyValue::f64("ninf", f64::NEG_INFINITY),
            KeyValue::new("list", Value::Array(Array::F64(vec![1.0, f64::NAN]))),
        ]);
        let encoded = serde_json::to_value(&attrs).unwrap();
        assert_eq!(encoded["nan"], json!({"Float": "NaN"}));
        assert_eq!(encoded["inf"], json!({"Float": "Infinity"}));
        assert_eq!(encoded["ninf"], json!({"Float": "-Infinity"}));
        assert_eq!(encoded["list"], json!([1.0, {"Float": "NaN"}]));

        let decoded: Attributes = serde_json::from_value(encoded).unwrap();
        assert_matches!(decoded["nan"], AttributeValue::Float(f) if f.is_nan());
        assert_eq!(decoded["inf"], AttributeValue::Float(f64::INFINITY));
        assert_eq!(decoded["ninf"], AttributeValue::Float(f64::NEG_INFINITY));
        assert_matches!(&decoded["list"], AttributeValue::List(items) => {
            assert_eq!(items[0], AttributeValue::Float(1.0));
            assert_matches!(items[1], AttributeValue::Float(f) if f.is_nan());
        });
    }

    #[test]
    fn test_non_finite_string_stays_a_string() {
        let attrs: Attributes = serde_json::from_value(json!({"s": "NaN"})).unwrap();
        assert_eq!(attrs["s"], AttributeValue::String("NaN".to_string()));
    }

    #[test]
    fn test_attribute_value_decode() {
        let attrs: Attributes =
            serde_json::from_value(json!({"f": 2.5, "i": 3, "n": [1, 2]})).unwrap();
        assert_eq!(attrs["f"], AttributeValue::Float(2.5));
        assert_eq!(attrs["i"], AttributeValue::Int(3));
        assert_eq!(
            attrs["n"],
            AttributeValue::List(vec![AttributeValue::Int(1), AttributeValue::Int(2)])
        );
    }
}
