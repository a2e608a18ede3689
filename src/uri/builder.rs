//! Mutable URI builder.
//!
//! [`UriBuilder`] wraps a [`Url`] so callers can rewrite the path and query
//! piecewise. Every write goes through the `Url` setters, which percent-encode, so
//! the builder always renders a valid absolute URI. All mutators work in place on a
//! caller-owned builder and return `&mut Self` for chaining.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::Url;

use super::query::QueryParams;
use super::segment::combine;
use crate::error::{Error, Result};

/// An absolute URI with mutable path, query and fragment.
///
/// Scheme, credentials, host and port are fixed by [`UriBuilder::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriBuilder {
    url: Url,
}

impl UriBuilder {
    /// Parses an absolute URI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if `input` is not an absolute URI.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Url::parse(input)?.into())
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// Percent-encoded path. Always starts with `/` when the URI has a host.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Query without its leading `?`, empty when there is none.
    pub fn query(&self) -> &str {
        self.url.query().unwrap_or_default()
    }

    /// Fragment without its leading `#`, empty when there is none.
    pub fn fragment(&self) -> &str {
        self.url.fragment().unwrap_or_default()
    }

    /// Replaces the path. Characters not allowed in a path, `?` and `#`
    /// included, are percent-encoded.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.url.set_path(path);
        self
    }

    /// Replaces the query. A leading `?` is dropped and an empty query removes it.
    pub fn set_query(&mut self, query: &str) -> &mut Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        self.url.set_query(non_empty(query));
        self
    }

    /// Replaces the fragment. A leading `#` is dropped and an empty fragment
    /// removes it.
    pub fn set_fragment(&mut self, fragment: &str) -> &mut Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.url.set_fragment(non_empty(fragment));
        self
    }

    /// Replaces the whole path with the combination of `segments`.
    ///
    /// Query and fragment tokens among the segments replace the query and
    /// fragment when they carry content. Does nothing when `segments` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use weblinks::uri::UriBuilder;
    ///
    /// let mut builder = UriBuilder::parse("http://example.com").unwrap();
    /// builder.path_combine(["test", "/sub-path-with-slashes/", "filename.ext"]);
    ///
    /// assert_eq!(
    ///     builder.to_string(),
    ///     "http://example.com/test/sub-path-with-slashes/filename.ext"
    /// );
    /// ```
    pub fn path_combine<I, S>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = segments.into_iter().peekable();
        if segments.peek().is_none() {
            return self;
        }

        let combined = combine(segments);
        self.write_combined(&combined);
        self
    }

    /// Appends one segment to the current path.
    ///
    /// Does nothing when `segment` is empty.
    pub fn append_path_segment(&mut self, segment: &str) -> &mut Self {
        self.append_path_segments([segment])
    }

    /// Appends segments to the current path, joined with the same rules as
    /// [`combine`].
    ///
    /// A query entry such as `file.ext?` only replaces the current query when
    /// parameters follow it; on its own it leaves the query as it was. Does
    /// nothing when the segments carry no content.
    pub fn append_path_segments<I, S>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tail = combine(segments);
        if tail.is_empty() {
            return self;
        }

        let combined = combine([self.url.path(), tail.as_str()]);
        self.write_combined(&combined);
        self
    }

    /// Current query as decoded pairs.
    pub fn query_params(&self) -> QueryParams {
        QueryParams::parse(self.query())
    }

    /// Appends parameters to the query. Existing parameters with the same name
    /// are kept.
    pub fn add_query_params<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut current = self.query_params();
        current.extend(params);
        self.write_query(&current);
        self
    }

    /// Appends the fields of a serializable struct or map to the query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `params` does not serialize to a flat
    /// struct or map, or if a field has no value. The builder is left untouched.
    pub fn add_query_params_from<T: Serialize + ?Sized>(
        &mut self,
        params: &T,
    ) -> Result<&mut Self> {
        let params = QueryParams::from_serialize(params)?;
        Ok(self.add_query_params(params.iter()))
    }

    /// Removes every query parameter named in `names`.
    pub fn remove_query_params<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            return self;
        }

        let mut current = self.query_params();
        current.remove(names);
        self.write_query(&current);
        self
    }

    /// Removes the query parameter `name`. Does nothing when `name` is empty.
    pub fn remove_query_param(&mut self, name: &str) -> &mut Self {
        if name.is_empty() {
            return self;
        }
        self.remove_query_params([name])
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn to_url(&self) -> Url {
        self.url.clone()
    }

    pub fn into_url(self) -> Url {
        self.url
    }

    /// Splits a combined `path?query#fragment` string into the builder's parts.
    fn write_combined(&mut self, combined: &str) {
        let (rest, fragment) = match combined.split_once('#') {
            Some((rest, fragment)) => (rest, non_empty(fragment)),
            None => (combined, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, non_empty(query)),
            None => (rest, None),
        };

        self.url.set_path(path);
        if query.is_some() {
            self.url.set_query(query);
        }
        if fragment.is_some() {
            self.url.set_fragment(fragment);
        }

        tracing::trace!(url = %self.url, "uri path rewritten");
    }

    fn write_query(&mut self, params: &QueryParams) {
        let query = params.to_string();
        self.url.set_query(non_empty(&query));
        tracing::trace!(url = %self.url, "uri query rewritten");
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl From<Url> for UriBuilder {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

impl From<UriBuilder> for Url {
    fn from(builder: UriBuilder) -> Self {
        builder.url
    }
}

impl FromStr for UriBuilder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for UriBuilder {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UriBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Combines `segments` and parses the result as an absolute [`Url`].
///
/// The first segment normally carries the scheme and host.
///
/// # Errors
///
/// Returns [`Error::InvalidUri`] if the combined string is not an absolute URI.
///
/// # Examples
///
/// ```
/// use weblinks::uri::combine_uri;
///
/// let url = combine_uri(["http://example.com", "test", "/sub-path-with-slashes/"]).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/test/sub-path-with-slashes");
/// ```
pub fn combine_uri<I, S>(segments: I) -> Result<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Url::parse(&combine(segments))?)
}
