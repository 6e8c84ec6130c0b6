//! Parses a textual HTTP/1.1 response, e.g. from a flat file, into a [MockResponse].
//!
//! A response file looks like this:
//!
//! ```text
//! HTTP/1.1 200 OK
//! Date: ${DATE}
//! Server: flatmock
//! Content-Type: text/plain; charset=UTF-8
//! Content-Length: ${LENGTH}
//!
//! Hello World!
//! ```
//!
//! A header value of exactly `${DATE}` is replaced with the current date, a header value of
//! exactly `${LENGTH}` with the length of the encoded body in bytes. The `charset` parameter of
//! `Content-Type` decides how the body is encoded.
use crate::common::{
    data::{Error, MockResponse, TypedBody, DEFAULT_CONTENT_TYPE},
    util::default_charset,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use encoding_rs::{EncoderResult, Encoding, UTF_16BE, UTF_16LE};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, Read},
    path::Path,
};

lazy_static! {
    static ref STATUS_LINE_PATTERN: Regex =
        Regex::new(r"^HTTP/1\.1 (?P<code>\d{3}) (?P<reason>.+)").expect("invalid status line regex");
    static ref HEADER_PATTERN: Regex =
        Regex::new(r"^(?P<name>[a-zA-Z-]+): (?P<value>.+)$").expect("invalid header regex");
    static ref CHARSET_PATTERN: Regex =
        Regex::new(r#"(?i)charset="?(?P<charset>[^";\s]+)"#).expect("invalid charset regex");
}

const DATE_PLACEHOLDER: &str = "${DATE}";
const LENGTH_PLACEHOLDER: &str = "${LENGTH}";
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

struct Status {
    code: u16,
    reason: String,
}

/// Parses a buffered reader into a [MockResponse] answering for `url`.
///
/// Same as [parse_reader]. Kept for callers that already hold a [BufRead].
pub fn parse<R: BufRead>(url: &str, input: R) -> Result<MockResponse, Error> {
    parse_reader(url, input)
}

/// Parses any reader into a [MockResponse] answering for `url`.
///
/// The whole input is consumed and decoded with the default charset (see
/// [default_charset]). Bytes that are malformed in that charset become U+FFFD instead of failing
/// the parse. Fails with [Error::InvalidStatusLine] if the first line is not an HTTP/1.1 status
/// line, and with [Error::Io] if reading fails.
pub fn parse_reader<R: Read>(url: &str, mut input: R) -> Result<MockResponse, Error> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;

    let text = decode(&bytes, &default_charset())?;
    parse_str(url, &text)
}

pub fn parse_str(url: &str, input: &str) -> Result<MockResponse, Error> {
    let mut lines = input.lines();

    let status = status(&mut lines)?;
    let headers = headers(&mut lines);
    let body = body(content_type(&headers), lines)?;

    let headers = PlaceholderReplacer::new(headers)
        .with_date(Utc::now())
        .with_length(body.len())
        .build();

    Ok(MockResponse::new(
        url,
        status.code,
        status.reason,
        headers,
        body,
    ))
}

/// Parses the file at `path` into a [MockResponse]. The file is closed before this
/// function returns, whether parsing succeeded or not.
pub fn parse_file<P: AsRef<Path>>(url: &str, path: P) -> Result<MockResponse, Error> {
    let path = path.as_ref();
    tracing::debug!("Parsing response file {}", path.display());
    let file = File::open(path)?;
    parse_reader(url, file)
}

fn status<'a, I>(lines: &mut I) -> Result<Status, Error>
where
    I: Iterator<Item = &'a str>,
{
    let line = lines.next().unwrap_or_default();
    let line = line.trim_start_matches('\u{feff}');

    let captures = match STATUS_LINE_PATTERN.captures(line) {
        None => return Err(Error::InvalidStatusLine(line.to_string())),
        Some(c) => c,
    };

    let code = captures["code"]
        .parse::<u16>()
        .map_err(|_| Error::InvalidStatusLine(line.to_string()))?;

    Ok(Status {
        code,
        reason: captures["reason"].to_string(),
    })
}

fn headers<'a, I>(lines: &mut I) -> Vec<(String, String)>
where
    I: Iterator<Item = &'a str>,
{
    let mut headers = Vec::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        match HEADER_PATTERN.captures(line) {
            Some(c) => headers.push((c["name"].to_string(), c["value"].to_string())),
            None => tracing::trace!("Skipping malformed header line {:?}", line),
        }
    }

    headers
}

fn content_type(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("Content-Type"))
        .map_or(DEFAULT_CONTENT_TYPE.to_string(), |(_, value)| value.clone())
}

fn body<'a, I>(mime_type: String, lines: I) -> Result<TypedBody, Error>
where
    I: Iterator<Item = &'a str>,
{
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }

    let bytes = encode(&text, &charset(&mime_type))?;
    Ok(TypedBody::new(mime_type, bytes))
}

fn charset(mime_type: &str) -> String {
    match CHARSET_PATTERN.captures(mime_type) {
        Some(c) => c["charset"].to_string(),
        None => default_charset(),
    }
}

fn encoding_for(charset: &str) -> Result<&'static Encoding, Error> {
    Encoding::for_label(charset.trim().as_bytes())
        .ok_or_else(|| Error::UnsupportedCharset(charset.to_string()))
}

fn decode(bytes: &[u8], charset: &str) -> Result<String, Error> {
    let encoding = encoding_for(charset)?;

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::trace!("Input is not valid {}, replaced malformed bytes", encoding.name());
    }

    Ok(text.into_owned())
}

fn encode(text: &str, charset: &str) -> Result<Bytes, Error> {
    let encoding = encoding_for(charset)?;

    // encoding_rs only decodes UTF-16, so both byte orders are written by hand.
    if encoding == UTF_16LE {
        return Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }

    let (bytes, _, had_unmappable) = encoding.encode(text);
    if !had_unmappable {
        return Ok(Bytes::copy_from_slice(&bytes));
    }

    tracing::trace!(
        "Body contains characters not representable in {}, replacing them with '?'",
        encoding.name()
    );
    Ok(Bytes::from(encode_replacing_unmappable(encoding, text)))
}

/// Encodes `text`, writing `?` for every character `encoding` cannot represent.
fn encode_replacing_unmappable(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut rest = text;

    loop {
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(rest.len())
            .unwrap_or(rest.len() * 4 + 16);
        let start = out.len();
        out.resize(start + capacity, 0);

        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(rest, &mut out[start..], true);
        out.truncate(start + written);
        rest = &rest[read..];

        match result {
            EncoderResult::InputEmpty => return out,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
}

struct PlaceholderReplacer {
    headers: Vec<(String, String)>,
    date: String,
    length: String,
}

impl PlaceholderReplacer {
    fn new(headers: Vec<(String, String)>) -> Self {
        Self {
            headers,
            date: String::new(),
            length: String::new(),
        }
    }

    fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date.format(DATE_FORMAT).to_string();
        self
    }

    fn with_length(mut self, length: usize) -> Self {
        self.length = length.to_string();
        self
    }

    fn build(self) -> Vec<(String, String)> {
        let Self {
            headers,
            date,
            length,
        } = self;

        headers
            .into_iter()
            .map(|(name, value)| match value.as_str() {
                DATE_PLACEHOLDER => (name, date.clone()),
                LENGTH_PLACEHOLDER => (name, length.clone()),
                _ => (name, value),
            })
            .collect()
    }
}
