//! Ordered query parameters.

use rust_decimal::Decimal;
use url::form_urlencoded;

/// A single query parameter value.
///
/// `Null` values are never serialized, so optional filters can be pushed
/// unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Text value.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean, rendered as `true`/`false`.
    Bool(bool),
    /// Absent value.
    Null,
}

impl QueryValue {
    /// Returns `true` for [`QueryValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }

    fn render(&self) -> Option<String> {
        match self {
            QueryValue::Str(s) => Some(s.clone()),
            QueryValue::Int(i) => Some(i.to_string()),
            QueryValue::UInt(u) => Some(u.to_string()),
            QueryValue::Float(f) => Some(f.to_string()),
            QueryValue::Bool(b) => Some(b.to_string()),
            QueryValue::Null => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Str(value.clone())
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::UInt(u64::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::UInt(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<Decimal> for QueryValue {
    fn from(value: Decimal) -> Self {
        QueryValue::Str(value.normalize().to_string())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

/// Query parameters in insertion order.
///
/// Array values are expressed by pushing the same key several times; the key
/// is repeated in the serialized output in the order the values were added.
///
/// ```rust
/// use chat2pay_core::http_client::{Query, QueryValue};
///
/// let query = Query::new()
///     .with("page", 2)
///     .with("merchant_id", QueryValue::Null)
///     .with_many("tag", ["a", "b"]);
/// assert_eq!(query.serialize(), "page=2&tag=a&tag=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one value for `key`.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends every value of an array for `key`, in order.
    pub fn push_many<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<QueryValue>,
    {
        let key = key.into();
        for value in values {
            self.pairs.push((key.clone(), value.into()));
        }
    }

    /// Builder form of [`Query::push`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Builder form of [`Query::push_many`].
    #[must_use]
    pub fn with_many<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<QueryValue>,
    {
        self.push_many(key, values);
        self
    }

    /// Returns `true` when no non-null value is present.
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, v)| v.is_null())
    }

    /// Form-urlencodes the non-null pairs. Empty when nothing remains.
    pub fn serialize(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            if let Some(rendered) = value.render() {
                serializer.append_pair(key, &rendered);
            }
        }
        serializer.finish()
    }

    /// Appends the serialized query to `url`, using `&` when it already
    /// carries a query string. The URL is untouched when nothing serializes.
    pub fn append_to(&self, url: &mut String) {
        let serialized = self.serialize();
        if serialized.is_empty() {
            return;
        }
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&serialized);
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.push(key, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_values_skipped() {
        let query = Query::new()
            .with("a", QueryValue::Null)
            .with("b", 1)
            .with("c", None::<String>);
        assert_eq!(query.serialize(), "b=1");
    }

    #[test]
    fn test_array_repeats_key_in_order() {
        let query = Query::new().with_many("id", [3_u64, 1, 2]);
        assert_eq!(query.serialize(), "id=3&id=1&id=2");
    }

    #[test]
    fn test_null_inside_array_skipped() {
        let query = Query::new().with_many("k", vec![Some("x"), None, Some("y")]);
        assert_eq!(query.serialize(), "k=x&k=y");
    }

    #[test]
    fn test_encoding() {
        let query = Query::new().with("q", "red shoes & bags");
        assert_eq!(query.serialize(), "q=red+shoes+%26+bags");
    }

    #[test]
    fn test_scalar_rendering() {
        let query = Query::new()
            .with("f", 1.5)
            .with("b", true)
            .with("n", -4_i64)
            .with("d", Decimal::new(12500, 2));
        assert_eq!(query.serialize(), "f=1.5&b=true&n=-4&d=125");
    }

    #[test]
    fn test_append_to() {
        let mut url = "http://h/api/products".to_string();
        Query::new().with("page", 1).append_to(&mut url);
        assert_eq!(url, "http://h/api/products?page=1");

        let mut url = "http://h/api?x=1".to_string();
        Query::new().with("y", 2).append_to(&mut url);
        assert_eq!(url, "http://h/api?x=1&y=2");

        let mut url = "http://h/api".to_string();
        Query::new().with("z", QueryValue::Null).append_to(&mut url);
        assert_eq!(url, "http://h/api");
    }

    #[test]
    fn test_is_empty_ignores_nulls() {
        assert!(Query::new().is_empty());
        assert!(Query::new().with("a", QueryValue::Null).is_empty());
        assert!(!Query::new().with("a", "").is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let query: Query = [("page", 1), ("limit", 20)].into_iter().collect();
        assert_eq!(query.serialize(), "page=1&limit=20");
    }
}
