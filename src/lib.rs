//! `flatmock` is a fake HTTP client for tests. Instead of sending requests over the network,
//! a [MockClient] answers them from an ordered list of routes you register up front.
//!
//! Each route pairs a request predicate with a response factory. The first route whose
//! predicate matches a request produces the response. Responses can be built in code or
//! loaded from **flat files**: plain text files that contain a raw HTTP/1.1 response with a
//! status line, headers, an empty line and the body.
//!
//! # Getting Started
//! Add `flatmock` to your `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! flatmock = "0.1.0"
//! ```
//!
//! You can then register routes and dispatch requests like this:
//! ```
//! use flatmock::prelude::*;
//!
//! let client = MockClient::when()
//!     .get()
//!     .with_path("/search")
//!     .with_query("query", "metallica")
//!     .then_return_template("HTTP/1.1 200 OK\nContent-Type: application/json\n\n{\"hits\":3}")
//!     .build();
//!
//! let response = client
//!     .dispatch(&MockRequest::new("GET", "http://localhost/search?query=metallica"))
//!     .unwrap();
//!
//! assert_eq!(response.status, 200);
//! assert_eq!(response.url, "http://localhost/search?query=metallica");
//! assert_eq!(response.body_str(), "{\"hits\":3}\n");
//! ```
//!
//! If no route matches, the client returns a `404 No route matched` response whose body lists
//! what the registered routes expected. This makes failing tests easy to diagnose.
//!
//! # Flat files
//! Flat files are parsed on every request, so changing a file takes effect immediately. The
//! header values `${DATE}` and `${LENGTH}` are replaced with the current date and the body
//! length in bytes. See the [parser] module for the exact format.
//!
//! ```
//! use flatmock::prelude::*;
//!
//! let client = MockClient::when()
//!     .get()
//!     .with_path("/user")
//!     .then_return_file(get_test_resource_file_path("tests/resources/http-200-response.txt").unwrap())
//!     .build();
//!
//! let response = client.dispatch(&MockRequest::new("GET", "http://localhost/user")).unwrap();
//! assert_eq!(response.status, 200);
//! ```
//!
//! # Configuration
//! Bodies whose `Content-Type` does not declare a charset are encoded as UTF-8. Set the
//! `FLATMOCK_DEFAULT_CHARSET` environment variable to use a different charset.
//!
//! # Debugging
//! `flatmock` logs through the `tracing` crate (with its `log` compatibility enabled). Which route
//! matched which request is logged on `debug` level, why a route did not match on `trace` level.
#[macro_use]
extern crate lazy_static;

mod common;

pub mod client;
pub mod matchers;
pub mod parser;

pub use client::{MockClient, MockClientBuilder, RouteBuilder};
pub use common::{
    data::{Error, MockRequest, MockResponse, TypedBody, DEFAULT_CONTENT_TYPE},
    util::{default_charset, get_test_resource_file_path},
};

/// Everything needed to register routes and dispatch requests.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        client::{
            response::{from_fn, Always, FromFile, FromTemplate, ResponseFactory},
            MockClient, MockClientBuilder, RouteBuilder,
        },
        common::{
            data::{Error, MockRequest, MockResponse, TypedBody},
            util::get_test_resource_file_path,
        },
        matchers::{
            all_of, any_of,
            body::{body_text, content_type, json_path, with_body},
            comparators::{
                any_value, contains, equal_to, equal_to_ignoring_case, matches_regex, not_empty,
                starts_with, value_that, ValueMatcher,
            },
            header::{basic_auth, header, with_basic_auth, with_header, with_headers},
            method::with_method,
            not, request_that,
            url::{path_with_params, with_path, with_path_matching, with_path_that, with_query, with_query_that},
            RequestPredicate, SharedPredicate,
        },
    };
}
