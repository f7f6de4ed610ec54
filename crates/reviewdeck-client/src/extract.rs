//! Generated-text extraction across response shapes
//!
//! Chat completions, legacy completions, the responses API and Gemini all
//! put the generated text in different places, and some fields may be
//! missing depending on the endpoint version. Known locations are tried in
//! a fixed order and the first non-blank one wins. When none matches, the
//! whole response is stringified so the caller still has something to show.

use serde_json::Value;

/// Outcome of text extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Text found at a known location
    Text(String),
    /// No known location matched; the whole response stringified
    Raw(String),
}

type Locator = fn(&Value) -> Option<String>;

/// Known text locations, in priority order
const LOCATORS: &[(&str, Locator)] = &[
    ("choices[0].message.content", message_content),
    ("choices[0].text", choice_text),
    ("output_text", output_text),
    ("output[].content", output_parts),
    ("candidates[0].content.parts", candidate_parts),
    ("text", top_level_text),
];

/// Extract generated text from a provider response.
pub fn extract_text(response: &Value) -> Extracted {
    for (location, locate) in LOCATORS {
        if let Some(text) = locate(response) {
            tracing::trace!("generated text found at {location}");
            return Extracted::Text(text);
        }
    }
    Extracted::Raw(stringify(response))
}

fn stringify(response: &Value) -> String {
    match response {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        other => other.to_string(),
    }
}

fn non_blank(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Text of a single content part, under whichever field name it uses.
fn part_text(part: &Value) -> Option<String> {
    match part {
        Value::String(s) => non_blank(s),
        Value::Object(_) => ["text", "output_text", "content"]
            .iter()
            .find_map(|key| match part.get(key)? {
                Value::String(s) => non_blank(s),
                nested => nested.get("value").and_then(Value::as_str).and_then(non_blank),
            }),
        _ => None,
    }
}

/// Join the texts of a content value that is either a string or a part list.
fn content_text(content: &Value, separator: &str) -> Option<String> {
    match content {
        Value::String(s) => non_blank(s),
        Value::Array(parts) => {
            let texts: Vec<String> = parts.iter().filter_map(part_text).collect();
            if texts.is_empty() {
                None
            } else {
                non_blank(&texts.join(separator))
            }
        }
        _ => None,
    }
}

fn first_choice(response: &Value) -> Option<&Value> {
    response.get("choices")?.get(0)
}

fn message_content(response: &Value) -> Option<String> {
    let content = first_choice(response)?.get("message")?.get("content")?;
    content_text(content, "")
}

fn choice_text(response: &Value) -> Option<String> {
    first_choice(response)?
        .get("text")?
        .as_str()
        .and_then(non_blank)
}

fn output_text(response: &Value) -> Option<String> {
    response.get("output_text")?.as_str().and_then(non_blank)
}

fn output_parts(response: &Value) -> Option<String> {
    let items = response.get("output")?.as_array()?;
    let texts: Vec<String> = items
        .iter()
        .filter_map(|item| content_text(item.get("content")?, "\n"))
        .collect();
    if texts.is_empty() {
        None
    } else {
        non_blank(&texts.join("\n"))
    }
}

fn candidate_parts(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?;
    content_text(parts, "")
}

fn top_level_text(response: &Value) -> Option<String> {
    response.get("text")?.as_str().and_then(non_blank)
}
