use crate::ResponseBody;

/// Picks the generated text out of a response.
///
/// A non-blank `output_text` wins outright. Otherwise the text blocks are
/// joined in item then block order with no separator and trimmed once.
/// Returns `None` when neither shape yields any text.
pub fn extract_text(body: &ResponseBody) -> Option<String> {
    if let Some(text) = body
        .output_text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        return Some(text.to_string());
    }

    let joined: String = body
        .output
        .iter()
        .flat_map(|item| &item.content)
        .filter_map(|block| block.text())
        .collect();

    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentBlock, OutputItem};

    fn blocks(texts: &[&str]) -> OutputItem {
        OutputItem {
            content: texts
                .iter()
                .map(|text| ContentBlock::Text(text.to_string()))
                .collect(),
        }
    }

    #[test]
    fn aggregated_text_wins_over_blocks() {
        let body = ResponseBody {
            output_text: Some("  hello world \n".to_string()),
            output: vec![blocks(&["ignored"])],
            usage: None,
        };
        assert_eq!(extract_text(&body).as_deref(), Some("hello world"));
    }

    #[test]
    fn blank_aggregated_text_falls_back_to_blocks() {
        let body = ResponseBody {
            output_text: Some("   ".to_string()),
            output: vec![blocks(&["part one", " part two"])],
            usage: None,
        };
        assert_eq!(extract_text(&body).as_deref(), Some("part one part two"));
    }

    #[test]
    fn blocks_join_across_items_without_separator() {
        let body = ResponseBody {
            output_text: None,
            output: vec![blocks(&[" a", "b "]), blocks(&[]), blocks(&["c\n"])],
            usage: None,
        };
        assert_eq!(extract_text(&body).as_deref(), Some("ab c"));
    }

    #[test]
    fn whitespace_only_blocks_yield_nothing() {
        let body = ResponseBody {
            output_text: None,
            output: vec![blocks(&[" ", "\n"])],
            usage: None,
        };
        assert_eq!(extract_text(&body), None);
    }
}
