//! Segment combining.
//!
//! Joins loosely structured tokens (path pieces, query pieces, a fragment) into one
//! `path?query#fragment` string. Each raw token is classified once into a [`Token`]
//! and the combiner state machine only ever matches on that closed set.
//!
//! # Token syntax
//!
//! - `#...` is a fragment, appended verbatim
//! - `?...` or `...?` enters query mode
//! - in query mode every other token is one query piece, joined with `&`
//! - anything else is a path segment, joined with `/`
//!
//! # Examples
//!
//! ```
//! use weblinks::uri::combine;
//!
//! let combined = combine([
//!     "test",
//!     "/sub-path-with-slashes/",
//!     "filename.ext?",
//!     "param1=1",
//!     "&param2=2",
//!     "#fragment",
//! ]);
//!
//! assert_eq!(
//!     combined,
//!     "test/sub-path-with-slashes/filename.ext?param1=1&param2=2#fragment"
//! );
//! ```

/// A classified input token with its structural characters already trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Path segment without leading or trailing `/`.
    PathSegment(&'a str),
    /// Token that switches the combiner into query mode, e.g. `file.ext?` or `?a=1`.
    QueryEntry(&'a str),
    /// One query piece without leading `?` and surrounding `&`.
    QueryFragment(&'a str),
    /// Fragment including its leading `#`.
    Fragment(&'a str),
}

/// Classifies a raw token.
///
/// `in_query` tells whether the combiner already entered query mode, which decides
/// whether plain text is a path segment or a query piece. Returns `None` when the
/// token carries no content once its separators are trimmed.
pub fn classify(raw: &str, in_query: bool) -> Option<Token<'_>> {
    if raw.is_empty() {
        return None;
    }

    let token = if raw.starts_with('#') {
        Token::Fragment(raw)
    } else if in_query {
        Token::QueryFragment(raw.trim_start_matches('?').trim_matches('&'))
    } else if raw.starts_with('?') || raw.ends_with('?') {
        Token::QueryEntry(raw.trim_start_matches('/').trim_end_matches('&'))
    } else {
        Token::PathSegment(raw.trim_matches('/'))
    };

    match token {
        Token::PathSegment(body) | Token::QueryEntry(body) | Token::QueryFragment(body)
            if body.is_empty() =>
        {
            None
        }
        token => Some(token),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Path,
    Query { expects_separator: bool },
}

#[derive(Debug)]
struct Combiner {
    out: String,
    mode: Mode,
}

impl Combiner {
    fn new() -> Self {
        Self {
            out: String::new(),
            mode: Mode::Path,
        }
    }

    fn in_query(&self) -> bool {
        matches!(self.mode, Mode::Query { .. })
    }

    fn push(&mut self, token: Token<'_>) {
        match token {
            Token::Fragment(body) => self.out.push_str(body),
            Token::PathSegment(body) => {
                if !self.out.is_empty() {
                    self.out.push('/');
                }
                self.out.push_str(body);
            }
            Token::QueryEntry(body) => {
                if !self.out.is_empty() {
                    self.out.push('/');
                }
                self.out.push_str(body);
                // `file.ext?` still waits for its first parameter, `?a=1` does not.
                self.mode = Mode::Query {
                    expects_separator: !body.ends_with('?'),
                };
            }
            Token::QueryFragment(body) => {
                if let Mode::Query {
                    expects_separator: true,
                } = self.mode
                {
                    self.out.push('&');
                }
                self.out.push_str(body);
                self.mode = Mode::Query {
                    expects_separator: true,
                };
            }
        }
    }
}

/// Combines raw tokens into a single `path?query#fragment` string.
///
/// Empty tokens, and tokens that are nothing but separators, contribute nothing.
/// Separators are never doubled: `["a/", "/b"]` and `["a", "b"]` both give `"a/b"`.
/// A `?`-prefixed token that arrives after the query has started is joined with `&`
/// like any other parameter, so `["a?", "x=1", "?y=2"]` gives `"a?x=1&y=2"` rather
/// than gluing `y=2` straight onto `x=1`.
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut combiner = Combiner::new();

    for segment in segments {
        if let Some(token) = classify(segment.as_ref(), combiner.in_query()) {
            combiner.push(token);
        }
    }

    combiner.out
}
