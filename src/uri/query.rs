//! Query string parameters.
//!
//! [`QueryParams`] is an ordered multi-map: duplicate keys are kept, in insertion
//! order. Parsing and serialisation go through `url::form_urlencoded`, so spaces
//! are written as `+`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{Error, Result};

/// Ordered list of decoded `(name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self { pairs }
    }

    /// Builds parameters from the public fields of a serializable value.
    ///
    /// The value must serialize as a struct or map. Strings are used as-is,
    /// numbers and booleans are stringified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the value is not a struct or map, or if
    /// a field is `null` (e.g. `None`), an array or a nested object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::InvalidArgument(format!("cannot serialize query params: {e}")))?;

        let Value::Object(fields) = value else {
            return Err(Error::InvalidArgument(
                "query params must serialize to a struct or map".to_string(),
            ));
        };

        let mut params = Self::new();
        for (name, value) in fields {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => {
                    return Err(Error::InvalidArgument(format!(
                        "query param '{name}' has no value"
                    )));
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::InvalidArgument(format!(
                        "query param '{name}' is not a scalar value"
                    )));
                }
            };
            params.push(name, value);
        }

        Ok(params)
    }

    /// Appends a pair. Existing pairs with the same name are kept.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Removes every pair whose name matches one of `names` exactly.
    pub fn remove<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        let names: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();

        self.pairs.retain(|(name, _)| !names.contains(name.as_str()));
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> Extend<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

/// Serialises as `k1=v1&k2=v2`, without a leading `?`.
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();

        f.write_str(&encoded)
    }
}
