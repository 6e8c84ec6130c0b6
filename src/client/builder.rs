use crate::{
    client::{
        response::{Always, FromFile, FromTemplate, ResponseFactory},
        MockClient, Route,
    },
    common::data::MockResponse,
    matchers::{
        all_of,
        body::{with_body, BodyCondition},
        comparators::ValueMatcher,
        header::{with_basic_auth, with_header},
        method::with_method,
        url::{path_with_params, with_path, with_path_matching, with_query},
        RequestPredicate, SharedPredicate,
    },
};
use std::{fmt::Display, path::PathBuf, sync::Arc};

/// Collects routes in registration order and freezes them into a [MockClient].
pub struct MockClientBuilder {
    routes: Vec<Route>,
}

impl MockClientBuilder {
    pub(crate) fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route. Routes registered earlier take precedence over later ones.
    pub fn route<P, F>(mut self, predicate: P, factory: F) -> Self
    where
        P: RequestPredicate + 'static,
        F: ResponseFactory + 'static,
    {
        self.routes.push(Route {
            predicate: Arc::new(predicate),
            response: Arc::new(factory),
        });
        self
    }

    /// Starts a route that matches any request until conditions are added to it.
    pub fn a_request(self) -> RouteBuilder {
        RouteBuilder::new(self)
    }

    pub fn get(self) -> RouteBuilder {
        self.a_request().with_method("GET")
    }

    pub fn post(self) -> RouteBuilder {
        self.a_request().with_method("POST")
    }

    pub fn put(self) -> RouteBuilder {
        self.a_request().with_method("PUT")
    }

    pub fn delete(self) -> RouteBuilder {
        self.a_request().with_method("DELETE")
    }

    pub fn build(self) -> MockClient {
        tracing::debug!("Building mock client with {} routes", self.routes.len());
        MockClient::new(self.routes)
    }
}

/// Accumulates the conditions of a single route. All conditions must hold for the
/// route to match.
pub struct RouteBuilder {
    builder: MockClientBuilder,
    predicates: Vec<SharedPredicate>,
}

impl RouteBuilder {
    fn new(builder: MockClientBuilder) -> Self {
        Self {
            builder,
            predicates: Vec::new(),
        }
    }

    pub fn matching<P: RequestPredicate + 'static>(mut self, predicate: P) -> Self {
        self.predicates.push(Arc::new(predicate));
        self
    }

    pub fn with_method<S: Into<String>>(self, method: S) -> Self {
        self.matching(with_method(method))
    }

    pub fn with_path<S: Into<String>>(self, path: S) -> Self {
        self.matching(with_path(path))
    }

    /// Panics if `pattern` is not a valid regular expression.
    pub fn with_path_matching(self, pattern: &str) -> Self {
        self.matching(with_path_matching(pattern))
    }

    pub fn with_path_params<I, K, V>(self, template: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        self.matching(path_with_params(template, params))
    }

    pub fn with_query<K: Into<String>, V: Into<String>>(self, key: K, value: V) -> Self {
        self.matching(with_query(key, value))
    }

    pub fn with_header<N, M>(self, name: N, value: M) -> Self
    where
        N: Into<String>,
        M: ValueMatcher + 'static,
    {
        self.matching(with_header(name, value))
    }

    pub fn with_basic_auth(self, username: &str, password: &str) -> Self {
        self.matching(with_basic_auth(username, password))
    }

    pub fn with_body(self, conditions: Vec<BodyCondition>) -> Self {
        self.matching(with_body(conditions))
    }

    /// Finishes the route with a response that is returned unchanged for every match.
    pub fn then_return(self, response: MockResponse) -> MockClientBuilder {
        self.then_respond_with(Always(response))
    }

    /// Finishes the route with a flat response file that is parsed on every match.
    pub fn then_return_file<P: Into<PathBuf>>(self, path: P) -> MockClientBuilder {
        self.then_respond_with(FromFile(path.into()))
    }

    /// Finishes the route with flat response text that is parsed on every match.
    pub fn then_return_template<S: Into<String>>(self, template: S) -> MockClientBuilder {
        self.then_respond_with(FromTemplate(template.into()))
    }

    pub fn then_respond_with<F: ResponseFactory + 'static>(self, factory: F) -> MockClientBuilder {
        let Self {
            builder,
            predicates,
        } = self;
        builder.route(all_of(predicates), factory)
    }
}
