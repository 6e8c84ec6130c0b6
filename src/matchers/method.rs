use crate::common::data::MockRequest;
use crate::matchers::RequestPredicate;

pub struct MethodPredicate {
    method: String,
}

impl RequestPredicate for MethodPredicate {
    fn matches(&self, req: &MockRequest) -> bool {
        self.method == req.method
    }

    fn describe(&self) -> String {
        format!("a request with method {:?}", self.method)
    }

    fn mismatch(&self, req: &MockRequest) -> Option<String> {
        match self.matches(req) {
            true => None,
            false => Some(format!("method was {:?}", req.method)),
        }
    }
}

/// Matches requests whose method equals `method` exactly (case-sensitive).
pub fn with_method<S: Into<String>>(method: S) -> MethodPredicate {
    MethodPredicate {
        method: method.into(),
    }
}
