use regex::Regex;

/// A predicate over a single string value, such as a header value, a path or a MIME type.
pub trait ValueMatcher: Send + Sync {
    fn matches(&self, value: &str) -> bool;

    /// Describes the values this matcher accepts.
    fn describe(&self) -> String;

    /// Describes why `value` was rejected, or `None` if it matches.
    fn mismatch(&self, value: &str) -> Option<String> {
        match self.matches(value) {
            true => None,
            false => Some(format!("was {:?}", value)),
        }
    }
}

impl<M: ValueMatcher + ?Sized> ValueMatcher for Box<M> {
    fn matches(&self, value: &str) -> bool {
        (**self).matches(value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn mismatch(&self, value: &str) -> Option<String> {
        (**self).mismatch(value)
    }
}

// ************************************************************************************************
// EqualTo
// ************************************************************************************************
pub struct EqualTo {
    expected: String,
}

impl ValueMatcher for EqualTo {
    fn matches(&self, value: &str) -> bool {
        self.expected == value
    }

    fn describe(&self) -> String {
        format!("{:?}", self.expected)
    }
}

pub fn equal_to<S: Into<String>>(expected: S) -> EqualTo {
    EqualTo {
        expected: expected.into(),
    }
}

// ************************************************************************************************
// EqualToIgnoringCase
// ************************************************************************************************
pub struct EqualToIgnoringCase {
    expected: String,
}

impl ValueMatcher for EqualToIgnoringCase {
    fn matches(&self, value: &str) -> bool {
        self.expected.to_lowercase() == value.to_lowercase()
    }

    fn describe(&self) -> String {
        format!("{:?} ignoring case", self.expected)
    }
}

pub fn equal_to_ignoring_case<S: Into<String>>(expected: S) -> EqualToIgnoringCase {
    EqualToIgnoringCase {
        expected: expected.into(),
    }
}

// ************************************************************************************************
// StartsWith
// ************************************************************************************************
pub struct StartsWith {
    prefix: String,
}

impl ValueMatcher for StartsWith {
    fn matches(&self, value: &str) -> bool {
        value.starts_with(&self.prefix)
    }

    fn describe(&self) -> String {
        format!("a string starting with {:?}", self.prefix)
    }
}

pub fn starts_with<S: Into<String>>(prefix: S) -> StartsWith {
    StartsWith {
        prefix: prefix.into(),
    }
}

// ************************************************************************************************
// Contains
// ************************************************************************************************
pub struct Contains {
    substring: String,
}

impl ValueMatcher for Contains {
    fn matches(&self, value: &str) -> bool {
        value.contains(&self.substring)
    }

    fn describe(&self) -> String {
        format!("a string containing {:?}", self.substring)
    }
}

pub fn contains<S: Into<String>>(substring: S) -> Contains {
    Contains {
        substring: substring.into(),
    }
}

// ************************************************************************************************
// NotEmpty / AnyValue
// ************************************************************************************************
pub struct NotEmpty;

impl ValueMatcher for NotEmpty {
    fn matches(&self, value: &str) -> bool {
        !value.is_empty()
    }

    fn describe(&self) -> String {
        "a non-empty string".to_string()
    }
}

pub fn not_empty() -> NotEmpty {
    NotEmpty
}

pub struct AnyValue;

impl ValueMatcher for AnyValue {
    fn matches(&self, _value: &str) -> bool {
        true
    }

    fn describe(&self) -> String {
        "any value".to_string()
    }
}

pub fn any_value() -> AnyValue {
    AnyValue
}

// ************************************************************************************************
// RegexMatcher
// ************************************************************************************************
/// Matches strings that match a regular expression in full, not just a substring of them.
pub struct RegexMatcher {
    pattern: String,
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl ValueMatcher for RegexMatcher {
    fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    fn describe(&self) -> String {
        format!("a string matching the pattern {}", self.pattern)
    }

    fn mismatch(&self, value: &str) -> Option<String> {
        match self.matches(value) {
            true => None,
            false => Some(format!(
                "Item {} did not match pattern {}",
                value, self.pattern
            )),
        }
    }
}

/// Creates a [RegexMatcher]. Panics if `pattern` is not a valid regular expression.
pub fn matches_regex(pattern: &str) -> RegexMatcher {
    RegexMatcher::new(pattern).expect("cannot parse value as regex")
}

// ************************************************************************************************
// FnMatcher
// ************************************************************************************************
pub struct FnMatcher {
    description: String,
    f: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

impl ValueMatcher for FnMatcher {
    fn matches(&self, value: &str) -> bool {
        (self.f)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// A matcher backed by a custom function. `description` is used in diagnostics.
pub fn value_that<D, F>(description: D, f: F) -> FnMatcher
where
    D: Into<String>,
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    FnMatcher {
        description: description.into(),
        f: Box::new(f),
    }
}
