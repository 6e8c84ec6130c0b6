use crate::{
    common::data::{Error, MockRequest, MockResponse, TypedBody, DEFAULT_CONTENT_TYPE},
    matchers::{any_of, RequestPredicate, SharedPredicate},
};
use std::sync::Arc;

pub mod builder;
pub mod response;

pub use builder::{MockClientBuilder, RouteBuilder};
use response::ResponseFactory;

pub const NO_ROUTE_STATUS: u16 = 404;
pub const NO_ROUTE_REASON: &str = "No route matched";
const NO_ROUTE_BODY_PREFIX: &str = "No matching route found. expected:\n";

pub(crate) struct Route {
    pub predicate: SharedPredicate,
    pub response: Arc<dyn ResponseFactory>,
}

/// A fake HTTP client that answers requests from a fixed, ordered list of routes.
///
/// Routes are tried in the order they were registered and the first route whose predicate
/// matches produces the response. Once built, a `MockClient` is immutable and can be shared
/// between threads.
///
/// ```
/// use flatmock::prelude::*;
///
/// let client = MockClient::when()
///     .get()
///     .with_path("/a")
///     .then_return(MockResponse::new("/a", 200, "OK", vec![], TypedBody::text("text/plain", "A")))
///     .build();
///
/// let response = client.dispatch(&MockRequest::new("GET", "http://localhost/a")).unwrap();
/// assert_eq!(response.body_str(), "A");
///
/// let response = client.dispatch(&MockRequest::new("GET", "http://localhost/c")).unwrap();
/// assert_eq!(response.status, 404);
/// ```
#[derive(Clone)]
pub struct MockClient {
    routes: Arc<[Route]>,
}

impl MockClient {
    pub(crate) fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: routes.into(),
        }
    }

    /// Starts registering routes.
    pub fn when() -> MockClientBuilder {
        MockClientBuilder::new()
    }

    /// Returns the response of the first route matching `req`.
    ///
    /// If no route matches, a `404 No route matched` response describing every registered
    /// route is returned instead. Errors of the chosen response factory are passed on as-is.
    pub fn dispatch(&self, req: &MockRequest) -> Result<MockResponse, Error> {
        tracing::trace!("Dispatching request: {} {}", req.method, req.url);

        for (idx, route) in self.routes.iter().enumerate() {
            if route.predicate.matches(req) {
                tracing::debug!(
                    "Matched route with index={} to request {} {}",
                    idx,
                    req.method,
                    req.url
                );
                return route.response.create_from(req);
            }

            if tracing::enabled!(tracing::Level::TRACE) {
                if let Some(reason) = route.predicate.mismatch(req) {
                    tracing::trace!("Route {} does not match: {}", idx, reason);
                }
            }
        }

        tracing::debug!(
            "Could not match any route to request {} {}",
            req.method,
            req.url
        );

        Ok(self.no_route_response(req))
    }

    pub fn routes(&self) -> usize {
        self.routes.len()
    }

    fn no_route_response(&self, req: &MockRequest) -> MockResponse {
        let expected = any_of(self.routes.iter().map(|r| r.predicate.clone()).collect());
        let body = format!("{}{}", NO_ROUTE_BODY_PREFIX, expected.describe());

        MockResponse::new(
            req.url.clone(),
            NO_ROUTE_STATUS,
            NO_ROUTE_REASON,
            Vec::new(),
            TypedBody::text(DEFAULT_CONTENT_TYPE, &body),
        )
    }
}
