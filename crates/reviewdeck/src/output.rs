//! Terminal output helpers
//!
//! Tables for `models` and `check`, and result printing for `generate`.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use reviewdeck_core::generation::GenerationResult;

/// Build a table with the standard preset and a header row.
pub fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header.to_vec());
    table
}

/// Write a generation result and report whether it carried text.
///
/// Text goes to `writer` as-is; errors are left to the caller. With `json`
/// set the result shape itself is written.
pub fn write_result(writer: &mut dyn Write, result: &GenerationResult, json: bool) -> Result<bool> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(result.is_text());
    }
    let Some(text) = result.as_text() else {
        return Ok(false);
    };
    if result.is_raw() {
        eprintln!(
            "{} no generated text found, showing the raw response",
            "Warning:".yellow().bold()
        );
    }
    writeln!(writer, "{text}")?;
    Ok(true)
}

/// One-line status for a self-test result
pub fn status_cell(result: &GenerationResult) -> String {
    match result {
        GenerationResult::Text {
            raw_response: false,
            ..
        } => "OK".to_string(),
        GenerationResult::Text { .. } => "OK (raw response)".to_string(),
        GenerationResult::Error { error } => {
            let first_line = error.lines().next().unwrap_or_default();
            format!("FAILED: {first_line}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text_result() {
        let mut buf = Vec::new();
        let ok = write_result(&mut buf, &GenerationResult::text("hello"), false).unwrap();
        assert!(ok);
        assert_eq!(String::from_utf8(buf).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_raw_result_still_prints_text() {
        let mut buf = Vec::new();
        let ok = write_result(&mut buf, &GenerationResult::raw("{\"id\":1}"), false).unwrap();
        assert!(ok);
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"id\":1}\n");
    }

    #[test]
    fn test_write_error_result_prints_nothing() {
        let mut buf = Vec::new();
        let ok = write_result(&mut buf, &GenerationResult::error("nope"), false).unwrap();
        assert!(!ok);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_json_result() {
        let mut buf = Vec::new();
        let ok = write_result(&mut buf, &GenerationResult::error("nope"), true).unwrap();
        assert!(!ok);
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value, serde_json::json!({"error": "nope"}));
    }

    #[test]
    fn test_status_cell() {
        assert_eq!(status_cell(&GenerationResult::text("OK")), "OK");
        assert_eq!(status_cell(&GenerationResult::raw("{}")), "OK (raw response)");
        assert_eq!(
            status_cell(&GenerationResult::error("bad key\n\nHint: x")),
            "FAILED: bad key"
        );
    }

    #[test]
    fn test_table_has_header() {
        let mut t = table(&["Model", "Provider"]);
        t.add_row(vec!["gpt-4o-mini", "OpenAI"]);
        let rendered = t.to_string();
        assert!(rendered.contains("Model"));
        assert!(rendered.contains("gpt-4o-mini"));
    }
}
