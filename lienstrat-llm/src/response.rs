//! Intermediate representation of a text-generation response.
//!
//! The provider answers either with an aggregated `output_text` string or a
//! list of output items carrying typed content blocks (sometimes both). Both
//! shapes decode into [`ResponseBody`]; malformed members decode as absent so
//! the extraction rules in [`crate::extract_text`] decide what is usable.

use serde::Deserialize;
use serde_json::Value;

use lienstrat_core::{normalize_usage, TokenUsage};

const TEXT_BLOCK_TYPES: [&str; 2] = ["output_text", "text"];

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(from = "RawResponse")]
pub struct ResponseBody {
    pub output_text: Option<String>,
    pub output: Vec<OutputItem>,
    pub usage: Option<TokenUsage>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputItem {
    pub content: Vec<ContentBlock>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContentBlock {
    Text(String),
    Other,
}

impl ContentBlock {
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(text) => Some(text.as_str()),
            ContentBlock::Other => None,
        }
    }
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    output_text: Value,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    usage: Option<Value>,
}

impl From<RawResponse> for ResponseBody {
    fn from(raw: RawResponse) -> Self {
        let output = match raw.output {
            Value::Array(items) => items.into_iter().map(OutputItem::from).collect(),
            _ => Vec::new(),
        };

        Self {
            output_text: raw.output_text.as_str().map(str::to_owned),
            output,
            usage: normalize_usage(raw.usage.as_ref()),
        }
    }
}

impl From<Value> for OutputItem {
    fn from(value: Value) -> Self {
        let content = match value {
            Value::Object(mut item) => match item.remove("content") {
                Some(Value::Array(blocks)) => blocks.into_iter().map(ContentBlock::from).collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        Self { content }
    }
}

impl From<Value> for ContentBlock {
    fn from(value: Value) -> Self {
        let Value::Object(mut block) = value else {
            return ContentBlock::Other;
        };

        let is_text = block
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|kind| TEXT_BLOCK_TYPES.contains(&kind));
        if !is_text {
            return ContentBlock::Other;
        }

        match block.remove("text") {
            Some(Value::String(text)) => ContentBlock::Text(text),
            _ => ContentBlock::Other,
        }
    }
}
