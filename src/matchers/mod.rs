use crate::common::data::MockRequest;
use std::sync::Arc;

pub mod body;
pub mod comparators;
pub mod header;
pub mod method;
pub mod url;

/// A condition an incoming request has to fulfill for a route to be chosen.
///
/// Implementations must be free of side effects and must not panic for any
/// well-formed request, so that dispatching is deterministic.
pub trait RequestPredicate: Send + Sync {
    fn matches(&self, req: &MockRequest) -> bool;

    /// A human-readable description of what this predicate expects.
    fn describe(&self) -> String;

    /// Explains why `req` does not match, or returns `None` if it does.
    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        match self.matches(req) {
            true => None,
            false => Some(format!("expected {}", self.describe())),
        }
    }

    /// Wraps the predicate so it can be shared between routes and combinators.
    fn shared(self) -> SharedPredicate
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

pub type SharedPredicate = Arc<dyn RequestPredicate>;

impl<P: RequestPredicate + ?Sized> RequestPredicate for Arc<P> {
    fn matches(&self, req: &MockRequest) -> bool {
        (**self).matches(req)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        (**self).mismatch(req)
    }
}

// ************************************************************************************************
// AllOf
// ************************************************************************************************
/// Matches if every contained predicate matches. An empty list matches any request.
pub struct AllOf {
    predicates: Vec<SharedPredicate>,
}

impl RequestPredicate for AllOf {
    fn matches(&self, req: &MockRequest) -> bool {
        self.predicates.iter().all(|p| p.matches(req))
    }

    fn describe(&self) -> String {
        match self.predicates.len() {
            0 => "any request".to_string(),
            1 => self.predicates[0].describe(),
            _ => join_descriptions(&self.predicates, " and "),
        }
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        let mismatches: Vec<String> = self
            .predicates
            .iter()
            .filter_map(|p| p.mismatch(req))
            .collect();

        match mismatches.is_empty() {
            true => None,
            false => Some(mismatches.join(", ")),
        }
    }
}

pub fn all_of(predicates: Vec<SharedPredicate>) -> AllOf {
    AllOf { predicates }
}

// ************************************************************************************************
// AnyOf
// ************************************************************************************************
/// Matches if at least one contained predicate matches. An empty list matches nothing.
pub struct AnyOf {
    predicates: Vec<SharedPredicate>,
}

impl RequestPredicate for AnyOf {
    fn matches(&self, req: &MockRequest) -> bool {
        self.predicates.iter().any(|p| p.matches(req))
    }

    fn describe(&self) -> String {
        match self.predicates.len() {
            0 => "nothing".to_string(),
            1 => self.predicates[0].describe(),
            _ => join_descriptions(&self.predicates, " or "),
        }
    }
}

pub fn any_of(predicates: Vec<SharedPredicate>) -> AnyOf {
    AnyOf { predicates }
}

fn join_descriptions(predicates: &[SharedPredicate], separator: &str) -> String {
    let parts: Vec<String> = predicates.iter().map(|p| p.describe()).collect();
    format!("({})", parts.join(separator))
}

// ************************************************************************************************
// Not
// ************************************************************************************************
pub struct Not {
    inner: SharedPredicate,
}

impl RequestPredicate for Not {
    fn matches(&self, req: &MockRequest) -> bool {
        !self.inner.matches(req)
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }
}

pub fn not<P: RequestPredicate + 'static>(predicate: P) -> Not {
    Not {
        inner: Arc::new(predicate),
    }
}

// ************************************************************************************************
// RequestThat
// ************************************************************************************************
pub struct RequestThat {
    description: String,
    f: Box<dyn Fn(&MockRequest) -> bool + Send + Sync>,
}

impl RequestPredicate for RequestThat {
    fn matches(&self, req: &MockRequest) -> bool {
        (self.f)(req)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// A predicate backed by a custom function. `description` is used in diagnostics.
pub fn request_that<D, F>(description: D, f: F) -> RequestThat
where
    D: Into<String>,
    F: Fn(&MockRequest) -> bool + Send + Sync + 'static,
{
    RequestThat {
        description: description.into(),
        f: Box::new(f),
    }
}
