use crate::common::data::MockRequest;
use crate::matchers::{comparators::ValueMatcher, RequestPredicate};
use serde_json::Value;

/// A single condition on the request body.
pub enum BodyCondition {
    /// The MIME type attached to the body.
    ContentType(Box<dyn ValueMatcher>),
    /// The whole body, decoded as UTF-8 text.
    Text(Box<dyn ValueMatcher>),
    /// A value looked up in the body parsed as JSON.
    JsonPath {
        path: String,
        matcher: Box<dyn ValueMatcher>,
    },
}

impl BodyCondition {
    fn describe(&self) -> String {
        match self {
            BodyCondition::ContentType(m) => format!("mime type {}", m.describe()),
            BodyCondition::Text(m) => format!("text {}", m.describe()),
            BodyCondition::JsonPath { path, matcher } => {
                format!("json path {:?} {}", path, matcher.describe())
            }
        }
    }

    fn mismatch(&self, text: &str, mime_type: &str, json: Option<&Value>) -> Option<String> {
        match self {
            BodyCondition::ContentType(m) => m
                .mismatch(mime_type)
                .map(|reason| format!("mime type {}", reason)),
            BodyCondition::Text(m) => m.mismatch(text).map(|reason| format!("text {}", reason)),
            BodyCondition::JsonPath { path, matcher } => {
                let json = match json {
                    None => return Some("was not valid JSON".to_string()),
                    Some(json) => json,
                };
                match json_path_value(json, path) {
                    None => Some(format!("json path {:?} was not present", path)),
                    Some(value) => matcher
                        .mismatch(&value)
                        .map(|reason| format!("json path {:?} {}", path, reason)),
                }
            }
        }
    }

    fn needs_json(&self) -> bool {
        matches!(self, BodyCondition::JsonPath { .. })
    }
}

pub fn content_type<M: ValueMatcher + 'static>(matcher: M) -> BodyCondition {
    BodyCondition::ContentType(Box::new(matcher))
}

pub fn body_text<M: ValueMatcher + 'static>(matcher: M) -> BodyCondition {
    BodyCondition::Text(Box::new(matcher))
}

/// Looks up `path` (e.g. `properties.foo` or `$.items[0].id`) in the JSON body and
/// checks the found value. Strings are compared without quotes, other values in
/// their JSON notation.
pub fn json_path<P: Into<String>, M: ValueMatcher + 'static>(path: P, matcher: M) -> BodyCondition {
    BodyCondition::JsonPath {
        path: path.into(),
        matcher: Box::new(matcher),
    }
}

// ************************************************************************************************
// BodyPredicate
// ************************************************************************************************
pub struct BodyPredicate {
    conditions: Vec<BodyCondition>,
}

impl BodyPredicate {
    fn first_mismatch(&self, req: &MockRequest) -> Option<String> {
        let text = req.body.to_maybe_lossy_str();

        let json = match self.conditions.iter().any(BodyCondition::needs_json) {
            false => None,
            true => match serde_json::from_str::<Value>(&text) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::trace!("Cannot parse request body as JSON: {}", e);
                    None
                }
            },
        };

        self.conditions
            .iter()
            .find_map(|c| c.mismatch(&text, &req.body.mime_type, json.as_ref()))
    }
}

impl RequestPredicate for BodyPredicate {
    fn matches(&self, req: &MockRequest) -> bool {
        self.first_mismatch(req).is_none()
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.conditions.iter().map(|c| c.describe()).collect();
        format!("a request with body ({})", parts.join(" and "))
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        self.first_mismatch(req)
            .map(|reason| format!("body {}", reason))
    }
}

/// Matches requests whose body satisfies every given condition.
pub fn with_body(conditions: Vec<BodyCondition>) -> BodyPredicate {
    BodyPredicate { conditions }
}

fn json_path_value(json: &Value, path: &str) -> Option<String> {
    let path = path.trim_start_matches('$').trim_start_matches('.');

    let mut current = json;
    for part in path.split('.') {
        if part.is_empty() {
            continue;
        }

        match part.find('[') {
            Some(bracket_pos) if part.ends_with(']') => {
                let field = &part[..bracket_pos];
                if !field.is_empty() {
                    current = current.get(field)?;
                }

                for index in part[bracket_pos + 1..part.len() - 1].split("][") {
                    let index: usize = index.parse().ok()?;
                    current = current.get(index)?;
                }
            }
            _ => current = current.get(part)?,
        }
    }

    match current {
        Value::String(s) => Some(s.clone()),
        _ => Some(current.to_string()),
    }
}
