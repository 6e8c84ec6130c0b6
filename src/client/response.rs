use crate::{
    common::data::{Error, MockRequest, MockResponse},
    parser,
};
use std::path::PathBuf;

/// Produces the response of a route from the request that triggered it.
pub trait ResponseFactory: Send + Sync {
    fn create_from(&self, req: &MockRequest) -> Result<MockResponse, Error>;
}

/// Builds every response with a custom function.
pub struct FromFn<F>(F);

impl<F> ResponseFactory for FromFn<F>
where
    F: Fn(&MockRequest) -> Result<MockResponse, Error> + Send + Sync,
{
    fn create_from(&self, req: &MockRequest) -> Result<MockResponse, Error> {
        (self.0)(req)
    }
}

pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&MockRequest) -> Result<MockResponse, Error> + Send + Sync,
{
    FromFn(f)
}

/// Always returns the same response. The request is ignored entirely, so the response keeps
/// the URL it was created with.
pub struct Always(pub MockResponse);

impl ResponseFactory for Always {
    fn create_from(&self, _req: &MockRequest) -> Result<MockResponse, Error> {
        Ok(self.0.clone())
    }
}

/// Parses a flat response file on every request. The request URL becomes the response URL.
pub struct FromFile(pub PathBuf);

impl ResponseFactory for FromFile {
    fn create_from(&self, req: &MockRequest) -> Result<MockResponse, Error> {
        parser::parse_file(&req.url, &self.0)
    }
}

/// Like [FromFile], but the flat response text is kept in memory.
pub struct FromTemplate(pub String);

impl ResponseFactory for FromTemplate {
    fn create_from(&self, req: &MockRequest) -> Result<MockResponse, Error> {
        parser::parse_str(&req.url, &self.0)
    }
}
