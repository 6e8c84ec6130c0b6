use crate::common::data::Error::ConversionError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input does not begin with a status line: {0:?}")]
    InvalidStatusLine(String),
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),
    #[error("cannot read response resource: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot convert to/from http structure: {0}")]
    ConversionError(String),
    #[error("{0}")]
    Custom(String),
}

/// The MIME type `flatmock` assigns to bodies that do not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// A request body together with its MIME type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypedBody {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl TypedBody {
    pub fn new<M: Into<String>, B: Into<Bytes>>(mime_type: M, bytes: B) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Creates a UTF-8 encoded text body.
    pub fn text<M: Into<String>>(mime_type: M, text: &str) -> Self {
        Self::new(mime_type, Bytes::copy_from_slice(text.as_bytes()))
    }

    /// An empty `text/plain` body.
    pub fn empty() -> Self {
        Self::new(DEFAULT_CONTENT_TYPE, Bytes::new())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Converts the bytes to a UTF-8 string, replacing invalid sequences with the
    /// Unicode replacement character. Borrows when the bytes are valid UTF-8.
    pub fn to_maybe_lossy_str(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl Default for TypedBody {
    fn default() -> Self {
        Self::empty()
    }
}

/// The request a [MockClient](crate::MockClient) is asked to answer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: TypedBody,
}

impl MockRequest {
    pub fn new<M: Into<String>, U: Into<String>>(method: M, url: U) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: TypedBody::empty(),
        }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: TypedBody) -> Self {
        self.body = body;
        self
    }

    /// Parses the request URL. Absolute URLs as well as origin-form targets
    /// (`/path?query`) are accepted.
    pub fn uri(&self) -> Option<http::Uri> {
        match self.url.parse::<http::Uri>() {
            Ok(uri) => Some(uri),
            Err(err) => {
                tracing::trace!("Cannot parse request URL {:?}: {}", self.url, err);
                None
            }
        }
    }

    /// The percent-decoded path of the request URL, or `None` if the URL cannot be parsed.
    /// A URL without a path, such as `http://localhost`, has the empty path.
    pub fn path(&self) -> Option<String> {
        let uri = self.uri()?;

        // http::Uri reports "/" for an absent path, so it is cut from the URL text instead.
        let raw = match uri.authority() {
            None => uri.path(),
            Some(authority) => self
                .url
                .split_once("://")
                .and_then(|(_, rest)| rest.strip_prefix(authority.as_str()))
                .and_then(|rest| rest.split(['?', '#']).next())
                .unwrap_or_default(),
        };

        Some(percent_decode(raw))
    }

    /// The percent-decoded query string of the request URL, if there is one.
    pub fn query(&self) -> Option<String> {
        self.uri()
            .and_then(|uri| uri.query().map(percent_decode))
    }

    /// Returns the value of the first header whose name equals `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

impl TryFrom<&http::Request<Bytes>> for MockRequest {
    type Error = Error;

    fn try_from(value: &http::Request<Bytes>) -> Result<Self, Self::Error> {
        let headers = value
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = value
                    .to_str()
                    .map_err(|err| ConversionError(err.to_string()))?;
                Ok((name.as_str().to_string(), value.to_string()))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let mime_type = find_header(&headers, "content-type")
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        // Since Bytes shares data, clone does not copy the body.
        Ok(MockRequest {
            method: value.method().to_string(),
            url: value.uri().to_string(),
            headers,
            body: TypedBody::new(mime_type, value.body().clone()),
        })
    }
}

/// A response produced by a route, either configured in code or parsed from a flat file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub url: String,
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: TypedBody,
}

impl MockResponse {
    pub fn new<U: Into<String>, R: Into<String>>(
        url: U,
        status: u16,
        reason: R,
        headers: Vec<(String, String)>,
        body: TypedBody,
    ) -> Self {
        Self {
            url: url.into(),
            status,
            reason: reason.into(),
            headers,
            body,
        }
    }

    /// Returns the value of the first header whose name equals `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn body_str(&self) -> Cow<str> {
        self.body.to_maybe_lossy_str()
    }
}

impl TryInto<http::Response<Bytes>> for &MockResponse {
    type Error = Error;

    fn try_into(self) -> Result<http::Response<Bytes>, Self::Error> {
        let mut builder = http::Response::builder().status(self.status);

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
            .body(self.body.bytes.clone())
            .map_err(|err| ConversionError(err.to_string()))
    }
}

impl fmt::Display for MockResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ({})", self.status, self.reason, self.url)
    }
}

/// Decodes `%XX` escapes. Byte sequences that are not valid UTF-8 after decoding are replaced
/// with the Unicode replacement character. `+` is kept as is.
fn percent_decode(value: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned()
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
