//! Query-string serialization.
//!
//! Keys are emitted in sorted order. Array values use the repeated-key
//! convention (`tag=a&tag=b`); an empty array contributes nothing. Keys and
//! values are `application/x-www-form-urlencoded`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{RestError, Result};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

macro_rules! scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(v: $ty) -> Self {
                    QueryValue::Scalar(v.to_string())
                }
            }
        )*
    };
}

scalar_from!(&str, String, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for QueryValue {
    fn from(values: &[T]) -> Self {
        QueryValue::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Mapping of query keys to values, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Append `value` under `key`, turning an existing scalar into a list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let merged = match self.0.remove(&key) {
            Some(QueryValue::Scalar(prev)) => QueryValue::List(vec![prev, value]),
            Some(QueryValue::List(mut list)) => {
                list.push(value);
                QueryValue::List(list)
            }
            None => QueryValue::Scalar(value),
        };
        self.0.insert(key, merged);
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten any serializable object into query parameters.
    ///
    /// Fields may be strings, numbers, booleans, null (skipped) or arrays of
    /// those. Nested objects and non-object top-level values are rejected.
    pub fn from_serialize<P: Serialize + ?Sized>(params: &P) -> Result<Self> {
        let value =
            serde_json::to_value(params).map_err(|e| RestError::InvalidQuery(e.to_string()))?;
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(RestError::InvalidQuery(format!(
                    "expected an object, got {}",
                    kind(&other)
                )))
            }
        };

        let mut out = BTreeMap::new();
        for (key, field) in fields {
            match field {
                Value::Null => {}
                Value::Array(items) => {
                    let mut list = Vec::with_capacity(items.len());
                    for item in items {
                        if let Some(s) = scalar(&key, item)? {
                            list.push(s);
                        }
                    }
                    out.insert(key, QueryValue::List(list));
                }
                other => {
                    if let Some(s) = scalar(&key, other)? {
                        out.insert(key, QueryValue::Scalar(s));
                    }
                }
            }
        }
        Ok(QueryParams(out))
    }

    /// Encode as a query string without the leading `?`.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            match value {
                QueryValue::Scalar(v) => {
                    serializer.append_pair(key, v);
                }
                QueryValue::List(values) => {
                    for v in values {
                        serializer.append_pair(key, v);
                    }
                }
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(RestError::InvalidQuery(format!(
            "field {key:?} is {}, expected a scalar",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_number() {
        let q = QueryParams::new().insert("test", 1);
        assert_eq!(q.encode(), "test=1");
    }

    #[test]
    fn test_keys_sorted() {
        let q = QueryParams::new().insert("b", "2").insert("a", "1");
        assert_eq!(q.encode(), "a=1&b=2");
    }

    #[test]
    fn test_array_repeats_key() {
        let q = QueryParams::new().insert("tag", vec!["x", "y"]);
        assert_eq!(q.encode(), "tag=x&tag=y");
    }

    #[test]
    fn test_empty_array_omitted() {
        let q = QueryParams::new()
            .insert("tag", Vec::<String>::new())
            .insert("page", 2u32);
        assert_eq!(q.encode(), "page=2");
    }

    #[test]
    fn test_reserved_characters_encoded() {
        let q = QueryParams::new().insert("q", "a&b=c d");
        assert_eq!(q.encode(), "q=a%26b%3Dc+d");
    }

    #[test]
    fn test_append_promotes_scalar_to_list() {
        let mut q = QueryParams::new().insert("id", "1");
        q.append("id", "2");
        q.append("id", "3");
        q.append("other", "x");
        assert_eq!(q.len(), 2);
        assert_eq!(
            q.get("id"),
            Some(&QueryValue::List(vec!["1".into(), "2".into(), "3".into()]))
        );
        assert_eq!(q.get("other"), Some(&QueryValue::Scalar("x".into())));
    }

    #[test]
    fn test_from_serialize_flattens_object() {
        let q = QueryParams::from_serialize(&json!({
            "test": 1,
            "name": "bob",
            "ids": [1, "two"],
            "active": true,
            "missing": null
        }))
        .unwrap();
        assert_eq!(q.encode(), "active=true&ids=1&ids=two&name=bob&test=1");
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        struct Params {
            page: u32,
            size: Option<u32>,
        }
        let q = QueryParams::from_serialize(&Params { page: 3, size: None }).unwrap();
        assert_eq!(q.encode(), "page=3");
    }

    #[test]
    fn test_from_serialize_rejects_nested_object() {
        let err = QueryParams::from_serialize(&json!({ "filter": { "a": 1 } })).unwrap_err();
        assert!(matches!(err, RestError::InvalidQuery(_)));
    }

    #[test]
    fn test_from_serialize_rejects_non_object() {
        let err = QueryParams::from_serialize(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, RestError::InvalidQuery(_)));
    }
}
