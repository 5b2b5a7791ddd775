use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token accounting reported by the hosted provider.
///
/// Every counter is independent; a missing counter serializes as `null`
/// rather than zero.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: Option<i64>,
    pub output_tokens: Option<i64>,
    pub total_tokens: Option<i64>,
    pub reasoning_tokens: Option<i64>,
}

impl TokenUsage {
    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none()
            && self.output_tokens.is_none()
            && self.total_tokens.is_none()
            && self.reasoning_tokens.is_none()
    }
}

/// Projects an arbitrary usage record onto [`TokenUsage`].
///
/// Only integer values of the four known counters survive; anything else is
/// dropped per key. Returns `None` both when no record was given and when
/// nothing in it was recognised.
pub fn normalize_usage(raw: Option<&Value>) -> Option<TokenUsage> {
    let fields = raw?.as_object()?;
    if fields.is_empty() {
        return None;
    }

    // JSON booleans and floats are not counters.
    let counter = |name: &str| fields.get(name).and_then(Value::as_i64);
    let usage = TokenUsage {
        input_tokens: counter("input_tokens"),
        output_tokens: counter("output_tokens"),
        total_tokens: counter("total_tokens"),
        reasoning_tokens: counter("reasoning_tokens"),
    };

    if usage.is_empty() {
        None
    } else {
        Some(usage)
    }
}
