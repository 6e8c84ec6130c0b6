use crate::common::data::MockRequest;
use crate::matchers::{
    comparators::{equal_to, matches_regex, ValueMatcher},
    RequestPredicate,
};
use std::fmt::Display;

pub type QueryPairs = Vec<(String, Option<String>)>;

// ************************************************************************************************
// Path
// ************************************************************************************************
pub struct PathPredicate {
    matcher: Box<dyn ValueMatcher>,
}

impl RequestPredicate for PathPredicate {
    fn matches(&self, req: &MockRequest) -> bool {
        req.path().map_or(false, |path| self.matcher.matches(&path))
    }

    fn describe(&self) -> String {
        format!("a request with path {}", self.matcher.describe())
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        match req.path() {
            None => Some(format!("URL {:?} has no readable path", req.url)),
            Some(path) => self
                .matcher
                .mismatch(&path)
                .map(|reason| format!("path {}", reason)),
        }
    }
}

/// Matches requests whose URL path equals `path` exactly.
pub fn with_path<S: Into<String>>(path: S) -> PathPredicate {
    with_path_that(equal_to(path))
}

/// Matches requests whose entire URL path matches the regular expression `pattern`.
/// Panics if `pattern` is not a valid regular expression.
pub fn with_path_matching(pattern: &str) -> PathPredicate {
    with_path_that(matches_regex(pattern))
}

pub fn with_path_that<M: ValueMatcher + 'static>(matcher: M) -> PathPredicate {
    PathPredicate {
        matcher: Box::new(matcher),
    }
}

/// Matches requests whose path equals `template` after every `{name}` placeholder has been
/// replaced with the corresponding parameter value.
///
/// ```
/// use flatmock::matchers::url::path_with_params;
/// use flatmock::matchers::RequestPredicate;
/// use flatmock::MockRequest;
///
/// let predicate = path_with_params("/users/{userId}", [("userId", 1)]);
/// assert!(predicate.matches(&MockRequest::new("GET", "http://localhost/users/1")));
/// ```
pub fn path_with_params<I, K, V>(template: &str, params: I) -> PathPredicate
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    with_path(substitute_params(template, params))
}

fn substitute_params<I, K, V>(template: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    params.into_iter().fold(template.to_string(), |path, (k, v)| {
        path.replace(&format!("{{{}}}", k.as_ref()), &v.to_string())
    })
}

// ************************************************************************************************
// Query
// ************************************************************************************************
/// Splits a raw query string into key/value pairs.
///
/// Pairs are separated by `&`, keys and values by the first `=`. A key without `=` has no value.
/// Empty segments (leading, trailing or doubled `&`) are ignored. The input is split as given;
/// [MockRequest::query] has already decoded escapes.
pub fn parse_query(query: &str) -> QueryPairs {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((k, v)) => (k.to_string(), Some(v.to_string())),
            None => (segment.to_string(), None),
        })
        .collect()
}

pub struct QueryPredicate {
    description: String,
    check: Box<dyn Fn(&[(String, Option<String>)]) -> bool + Send + Sync>,
}

impl QueryPredicate {
    fn pairs(req: &MockRequest) -> Option<QueryPairs> {
        req.uri()?;
        Some(req.query().map_or(Vec::new(), |query| parse_query(&query)))
    }
}

impl RequestPredicate for QueryPredicate {
    fn matches(&self, req: &MockRequest) -> bool {
        QueryPredicate::pairs(req).map_or(false, |pairs| (self.check)(pairs.as_slice()))
    }

    fn describe(&self) -> String {
        format!("a request with query {}", self.description)
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        match QueryPredicate::pairs(req) {
            None => Some(format!("URL {:?} has no readable query", req.url)),
            Some(pairs) if (self.check)(pairs.as_slice()) => None,
            Some(pairs) => Some(format!("query was {:?}", pairs)),
        }
    }
}

/// Matches requests whose query contains the pair `key=value`.
pub fn with_query<K: Into<String>, V: Into<String>>(key: K, value: V) -> QueryPredicate {
    let key = key.into();
    let value = value.into();
    let description = format!("containing [{:?}->{:?}]", key, value);

    with_query_that(description, move |pairs| {
        pairs
            .iter()
            .any(|(k, v)| k == &key && v.as_deref() == Some(value.as_str()))
    })
}

/// Matches requests whose query pairs satisfy a custom function.
pub fn with_query_that<D, F>(description: D, f: F) -> QueryPredicate
where
    D: Into<String>,
    F: Fn(&[(String, Option<String>)]) -> bool + Send + Sync + 'static,
{
    QueryPredicate {
        description: description.into(),
        check: Box::new(f),
    }
}
