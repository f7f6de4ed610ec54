//! Multipart form collection and upload decoding
//!
//! An uploaded file replaces the pasted text. PDF uploads have their page
//! text extracted; other uploads (markdown, CSV) are decoded as UTF-8.
//! Anything that fails to decode yields empty text.

use std::collections::HashMap;

use axum::extract::Multipart;
use reviewdeck_core::generation::DEFAULT_MAX_TOKENS;
use tracing::{debug, warn};

use super::handlers::AppError;

const UTF8_BOM: &str = "\u{feff}";

/// Separator placed between the text of consecutive PDF pages
const PAGE_SEPARATOR: &str = "\n\n";

/// A file attached to the form
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Text fields plus at most one uploaded file
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    upload: Option<Upload>,
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;

            match file_name {
                Some(file_name) if !file_name.is_empty() && !bytes.is_empty() => {
                    debug!("received upload {} ({} bytes)", file_name, bytes.len());
                    form.upload = Some(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                Some(_) => {}
                None => {
                    let value = String::from_utf8_lossy(&bytes).into_owned();
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// A text field, empty when absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The `model` field, or `default` when absent or blank.
    pub fn model(&self, default: &str) -> String {
        let model = self.get("model").trim();
        if model.is_empty() {
            default.to_string()
        } else {
            model.to_string()
        }
    }

    /// The `max_tokens` field, defaulting when blank.
    pub fn max_tokens(&self) -> Result<u32, AppError> {
        let raw = self.get("max_tokens").trim();
        if raw.is_empty() {
            return Ok(DEFAULT_MAX_TOKENS);
        }
        match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::BadRequest(format!(
                "max_tokens must be a positive whole number, got '{raw}'"
            ))),
        }
    }

    /// The material to process: the uploaded file if any, else the pasted text.
    pub fn source_text(&self) -> String {
        match &self.upload {
            Some(upload) => decode_upload(&upload.file_name, &upload.bytes),
            None => self.get("pasted").to_string(),
        }
    }
}

/// Decode an uploaded file to text.
pub fn decode_upload(file_name: &str, bytes: &[u8]) -> String {
    if file_name.to_ascii_lowercase().ends_with(".pdf") {
        return extract_pdf_text(file_name, bytes);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
        Err(e) => {
            warn!("{file_name}: upload is not valid UTF-8 ({e})");
            String::new()
        }
    }
}

/// Page text of a PDF, pages joined by a blank line.
fn extract_pdf_text(file_name: &str, bytes: &[u8]) -> String {
    // The parser panics on some malformed documents.
    let pages =
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));
    match pages {
        Ok(Ok(pages)) => {
            debug!("{file_name}: extracted text from {} PDF pages", pages.len());
            pages.join(PAGE_SEPARATOR)
        }
        Ok(Err(e)) => {
            warn!("{file_name}: could not extract PDF text ({e})");
            String::new()
        }
        Err(_) => {
            warn!("{file_name}: could not extract PDF text (malformed document)");
            String::new()
        }
    }
}
