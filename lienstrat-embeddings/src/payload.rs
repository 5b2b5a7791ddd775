use serde::Deserialize;
use serde_json::Value;

use lienstrat_core::{normalize_usage, TokenUsage};

/// Decoded batch-embedding response.
///
/// Items whose `embedding` member is missing or not an array are dropped, so
/// the vector count can be checked against the request afterwards.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(try_from = "RawEmbeddings")]
pub struct EmbeddingsBody {
    pub vectors: Vec<Vec<f32>>,
    pub usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct RawEmbeddings {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    usage: Option<Value>,
}

impl TryFrom<RawEmbeddings> for EmbeddingsBody {
    type Error = String;

    fn try_from(raw: RawEmbeddings) -> Result<Self, Self::Error> {
        let items = match raw.data {
            Value::Array(items) => items,
            _ => Vec::new(),
        };

        let mut vectors = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Some(values) = item.get("embedding").and_then(Value::as_array) else {
                continue;
            };
            let vector = values
                .iter()
                .map(|value| value.as_f64().map(|number| number as f32))
                .collect::<Option<Vec<f32>>>()
                .ok_or_else(|| format!("embedding {index} contains a non-numeric value"))?;
            vectors.push(vector);
        }

        Ok(Self {
            vectors,
            usage: normalize_usage(raw.usage.as_ref()),
        })
    }
}
