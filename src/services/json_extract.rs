use std::error::Error;
use std::fmt;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

const ERROR_SNIPPET_LEN: usize = 200;

/// Shape of the JSON span expected inside a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn open(self) -> char {
        match self {
            JsonShape::Object => '{',
            JsonShape::Array => '[',
        }
    }

    fn close(self) -> char {
        match self {
            JsonShape::Object => '}',
            JsonShape::Array => ']',
        }
    }
}

#[derive(Debug)]
pub struct ExtractionError {
    reason: String,
    snippet: String,
}

impl ExtractionError {
    fn new(reason: impl Into<String>, text: &str) -> Self {
        let mut snippet: String = text.chars().take(ERROR_SNIPPET_LEN).collect();
        if text.chars().count() > ERROR_SNIPPET_LEN {
            snippet.push_str("...");
        }
        Self {
            reason: reason.into(),
            snippet,
        }
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.snippet)
    }
}

impl Error for ExtractionError {}

/// Extract the first balanced JSON span of the requested shape from a model
/// response and parse it, repairing trailing/duplicate commas if the first
/// parse fails. Re-running on already-valid JSON yields the same value.
pub fn extract_json(text: &str, shape: JsonShape) -> Result<Value, ExtractionError> {
    let stripped = strip_code_fences(text);
    let span = find_balanced_span(stripped, shape)
        .ok_or_else(|| ExtractionError::new("No balanced JSON span found", stripped))?;

    match serde_json::from_str(span) {
        Ok(value) => Ok(value),
        Err(parse_err) => {
            let repaired = repair(span);
            serde_json::from_str(&repaired).map_err(|_| {
                ExtractionError::new(format!("Unparseable JSON ({})", parse_err), span)
            })
        }
    }
}

/// Typed variant of [`extract_json`].
pub fn extract_as<T: DeserializeOwned>(text: &str, shape: JsonShape) -> Result<T, ExtractionError> {
    let value = extract_json(text, shape)?;
    serde_json::from_value(value)
        .map_err(|err| ExtractionError::new(format!("Unexpected JSON structure ({})", err), text))
}

fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        s = rest.trim_start();
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest.trim_end();
    }
    s
}

/// Bracket-counting scan for the first balanced span of the requested
/// shape. String- and escape-aware, so braces inside string literals do not
/// affect the depth count. A greedy regex would mis-extract here.
fn find_balanced_span(text: &str, shape: JsonShape) -> Option<&str> {
    let open = shape.open();
    let close = shape.close();
    let start = text.find(open)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(&text[start..start + offset + c.len_utf8()]);
            }
        }
    }
    None
}

/// Repair passes for common model output defects: duplicate commas are
/// collapsed, trailing commas before `}` / `]` removed.
fn repair(span: &str) -> String {
    let duplicate_commas = Regex::new(r",\s*,").unwrap();
    let trailing_commas = Regex::new(r",\s*([}\]])").unwrap();

    let mut repaired = span.to_string();
    loop {
        let collapsed = duplicate_commas.replace_all(&repaired, ",").into_owned();
        if collapsed == repaired {
            break;
        }
        repaired = collapsed;
    }
    trailing_commas.replace_all(&repaired, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_json_matches_direct_parse() {
        let raw = r#"{"name": "Kyoto", "rating": 4.7}"#;
        let fenced = format!("```json\n{}\n```", raw);

        let direct: Value = serde_json::from_str(raw).unwrap();
        let extracted = extract_json(&fenced, JsonShape::Object).unwrap();
        assert_eq!(direct, extracted);
    }

    #[test]
    fn fenced_array_without_language_tag() {
        let fenced = "```\n[1, 2, 3]\n```";
        let extracted = extract_json(fenced, JsonShape::Array).unwrap();
        assert_eq!(extracted, json!([1, 2, 3]));
    }

    #[test]
    fn trailing_comma_is_repaired() {
        let text = r#"{"highlights": ["Temples", "Gardens",], "rating": 4.7,}"#;
        let extracted = extract_json(text, JsonShape::Object).unwrap();
        assert_eq!(
            extracted,
            json!({"highlights": ["Temples", "Gardens"], "rating": 4.7})
        );
    }

    #[test]
    fn duplicate_commas_are_collapsed() {
        let text = r#"[1,, 2,,, 3]"#;
        let extracted = extract_json(text, JsonShape::Array).unwrap();
        assert_eq!(extracted, json!([1, 2, 3]));
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let text = "Here are your destinations:\n[{\"name\": \"Banff\"}]\nEnjoy the trip!";
        let extracted = extract_json(text, JsonShape::Array).unwrap();
        assert_eq!(extracted, json!([{"name": "Banff"}]));
    }

    #[test]
    fn first_balanced_span_wins_over_greedy_match() {
        // A greedy `\{.*\}` regex would capture from the first `{` to the
        // last `}` and fail to parse.
        let text = r#"{"a": 1} and later {"b": 2}"#;
        let extracted = extract_json(text, JsonShape::Object).unwrap();
        assert_eq!(extracted, json!({"a": 1}));
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_span() {
        let text = r#"{"note": "use {placeholders} like this", "ok": true}"#;
        let extracted = extract_json(text, JsonShape::Object).unwrap();
        assert_eq!(extracted["ok"], json!(true));
    }

    #[test]
    fn escaped_quotes_inside_strings_are_handled() {
        let text = r#"{"quote": "she said \"go\"", "n": 1}"#;
        let extracted = extract_json(text, JsonShape::Object).unwrap();
        assert_eq!(extracted["n"], json!(1));
    }

    #[test]
    fn idempotent_on_valid_json() {
        let text = r#"{"name": "Santorini", "highlights": ["Oia Sunset"]}"#;
        let first = extract_json(text, JsonShape::Object).unwrap();
        let second = extract_json(&first.to_string(), JsonShape::Object).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_span_reports_truncated_snippet() {
        let text = "no json here ".repeat(40);
        let err = extract_json(&text, JsonShape::Object).unwrap_err();
        assert!(err.snippet().len() <= ERROR_SNIPPET_LEN + 3);
    }

    #[test]
    fn unbalanced_span_is_an_error() {
        let text = r#"{"name": "Petra""#;
        assert!(extract_json(text, JsonShape::Object).is_err());
    }

    #[test]
    fn array_shape_skips_leading_object() {
        let text = r#"ignore {"this": 1} but take ["Paris", "Rome"]"#;
        let extracted = extract_json(text, JsonShape::Array).unwrap();
        assert_eq!(extracted, json!(["Paris", "Rome"]));
    }

    #[test]
    fn typed_extraction() {
        let text = "```json\n[\"Bali, Indonesia\", \"Maldives\"]\n```";
        let suggestions: Vec<String> = extract_as(text, JsonShape::Array).unwrap();
        assert_eq!(suggestions, vec!["Bali, Indonesia", "Maldives"]);
    }
}
