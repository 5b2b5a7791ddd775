//! Request bodies accepted by the AI routes, with their field checks.
//!
//! Bodies are decoded field by field from a JSON value so that every rejected
//! field is reported under its own `loc`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use lienstrat_core::{EmbeddingRequest, TextGenerationRequest, DEFAULT_TEMPERATURE};

use crate::ValidationIssue;

const MAX_TEMPERATURE: f32 = 2.0;

#[derive(Clone, Copy, Debug)]
enum Expected {
    String,
    Number,
    Integer,
    StringList,
}

impl Expected {
    fn msg(self) -> &'static str {
        match self {
            Expected::String => "Input should be a valid string",
            Expected::Number => "Input should be a valid number",
            Expected::Integer => "Input should be a valid integer",
            Expected::StringList => "Input should be a valid list of strings",
        }
    }

    fn kind(self) -> &'static str {
        match self {
            Expected::String => "string_type",
            Expected::Number => "float_type",
            Expected::Integer => "int_type",
            Expected::StringList => "list_type",
        }
    }
}

/// Collects per-field decode issues while reading a JSON object.
struct Fields<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<ValidationIssue>,
}

impl<'a> Fields<'a> {
    fn of(body: &'a Value) -> Result<Self, Vec<ValidationIssue>> {
        match body.as_object() {
            Some(object) => Ok(Self {
                object,
                issues: Vec::new(),
            }),
            None => Err(vec![ValidationIssue::body(
                None,
                "Input should be a valid dictionary or object",
                "model_attributes_type",
            )]),
        }
    }

    fn required<T: DeserializeOwned>(&mut self, name: &str, expected: Expected) -> Option<T> {
        match self.object.get(name) {
            None => {
                self.issues
                    .push(ValidationIssue::body(Some(name), "Field required", "missing"));
                None
            }
            Some(value) => self.decode(name, value, expected),
        }
    }

    /// Absent and `null` both read as `None`.
    fn optional<T: DeserializeOwned>(&mut self, name: &str, expected: Expected) -> Option<T> {
        match self.object.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => self.decode(name, value, expected),
        }
    }

    fn decode<T: DeserializeOwned>(
        &mut self,
        name: &str,
        value: &Value,
        expected: Expected,
    ) -> Option<T> {
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                self.issues
                    .push(ValidationIssue::body(Some(name), expected.msg(), expected.kind()));
                None
            }
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, Vec<ValidationIssue>> {
        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => Err(self.issues),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextGenerationPayload {
    pub prompt: String,
    pub model: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: Option<i64>,
}

impl TextGenerationPayload {
    pub fn from_json(body: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let mut fields = Fields::of(body)?;
        let prompt = fields.required::<String>("prompt", Expected::String);
        let model = fields.optional::<String>("model", Expected::String);
        let temperature = fields.optional::<f32>("temperature", Expected::Number);
        let max_output_tokens = fields.optional::<i64>("max_output_tokens", Expected::Integer);

        let payload = prompt.map(|prompt| Self {
            prompt,
            model,
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_output_tokens,
        });
        fields.finish(payload)
    }

    pub fn validate(self) -> Result<TextGenerationRequest, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        if self.prompt.is_empty() {
            issues.push(ValidationIssue::body(
                Some("prompt"),
                "String should have at least 1 character",
                "string_too_short",
            ));
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            issues.push(ValidationIssue::body(
                Some("temperature"),
                "Input should be between 0 and 2",
                "range_error",
            ));
        }
        let max_output_tokens = match self.max_output_tokens {
            None => None,
            Some(value) => match u32::try_from(value) {
                Ok(tokens) if tokens > 0 => Some(tokens),
                _ => {
                    issues.push(ValidationIssue::body(
                        Some("max_output_tokens"),
                        "Input should be a positive integer",
                        "greater_than",
                    ));
                    None
                }
            },
        };

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(TextGenerationRequest {
            prompt: self.prompt,
            model: self.model,
            temperature: self.temperature,
            max_output_tokens,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingsPayload {
    pub texts: Vec<String>,
    pub model: Option<String>,
}

impl EmbeddingsPayload {
    pub fn from_json(body: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let mut fields = Fields::of(body)?;
        let texts = fields.required::<Vec<String>>("texts", Expected::StringList);
        let model = fields.optional::<String>("model", Expected::String);

        let payload = texts.map(|texts| Self { texts, model });
        fields.finish(payload)
    }

    pub fn validate(self) -> Result<EmbeddingRequest, Vec<ValidationIssue>> {
        if self.texts.is_empty() {
            return Err(vec![ValidationIssue::body(
                Some("texts"),
                "List should have at least 1 item",
                "too_short",
            )]);
        }
        if self.texts.iter().any(|text| text.trim().is_empty()) {
            return Err(vec![ValidationIssue::body(
                Some("texts"),
                "Texts must be non-empty strings.",
                "value_error",
            )]);
        }

        Ok(EmbeddingRequest {
            texts: self.texts,
            model: self.model,
        })
    }
}
