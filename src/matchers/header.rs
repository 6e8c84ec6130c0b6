use crate::common::data::MockRequest;
use crate::matchers::{
    comparators::{equal_to, ValueMatcher},
    RequestPredicate,
};
use base64::{engine::general_purpose::STANDARD, Engine};

/// A condition on a single header: the name is compared ignoring case, the value
/// is checked by a [ValueMatcher].
pub struct HeaderPredicate {
    name: String,
    value: Box<dyn ValueMatcher>,
}

impl HeaderPredicate {
    pub fn matches_header(&self, name: &str, value: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.value.matches(value)
    }

    pub fn describe(&self) -> String {
        format!(
            "a header with name {:?} (ignoring case) and value {}",
            self.name,
            self.value.describe()
        )
    }

    fn is_present_in(&self, headers: &[(String, String)]) -> bool {
        headers.iter().any(|(k, v)| self.matches_header(k, v))
    }
}

pub fn header<N: Into<String>, M: ValueMatcher + 'static>(name: N, value: M) -> HeaderPredicate {
    HeaderPredicate {
        name: name.into(),
        value: Box::new(value),
    }
}

/// Matches a header `Authorization: Basic <base64(username:password)>`.
pub fn basic_auth(username: &str, password: &str) -> HeaderPredicate {
    let credentials = STANDARD.encode(format!("{}:{}", username, password));
    header("Authorization", equal_to(format!("Basic {}", credentials)))
}

// ************************************************************************************************
// WithHeaders
// ************************************************************************************************
pub struct WithHeaders {
    headers: Vec<HeaderPredicate>,
}

impl WithHeaders {
    fn get_unmatched<'a>(&'a self, req: &MockRequest) -> Vec<&'a HeaderPredicate> {
        self.headers
            .iter()
            .filter(|h| !h.is_present_in(&req.headers))
            .collect()
    }
}

impl RequestPredicate for WithHeaders {
    fn matches(&self, req: &MockRequest) -> bool {
        self.get_unmatched(req).is_empty()
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.headers.iter().map(|h| h.describe()).collect();
        format!("a request with headers containing [{}]", parts.join(", "))
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        let unmatched = self.get_unmatched(req);
        if unmatched.is_empty() {
            return None;
        }

        let expected: Vec<String> = unmatched.iter().map(|h| h.describe()).collect();
        Some(format!(
            "no header matched [{}] in {:?}",
            expected.join(", "),
            req.headers
        ))
    }
}

/// Matches requests that contain, for every given header predicate, at least one
/// header satisfying it.
pub fn with_headers(headers: Vec<HeaderPredicate>) -> WithHeaders {
    WithHeaders { headers }
}

pub fn with_header<N: Into<String>, M: ValueMatcher + 'static>(name: N, value: M) -> WithHeaders {
    with_headers(vec![header(name, value)])
}

pub fn with_basic_auth(username: &str, password: &str) -> WithHeaders {
    with_headers(vec![basic_auth(username, password)])
}
