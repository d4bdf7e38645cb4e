//! Buffered multipart form parsing.
//!
//! [`FormData::from_multipart`] drains an Axum [`Multipart`] stream into
//! text values and file parts keyed by field name. Handlers then pick the
//! fields they know and ignore the rest.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use khcrf_core::error::CoreError;
use khcrf_core::list_field;

use crate::error::{AppError, AppResult};

/// One uploaded file, held in memory until the upload store writes it.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Client-supplied filename. Only its extension is ever used.
    pub file_name: String,
    pub bytes: Bytes,
}

/// All fields of a multipart request.
#[derive(Debug, Default)]
pub struct FormData {
    texts: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<FilePart>>,
}

impl FormData {
    /// Read every field of `multipart`.
    ///
    /// Parts with a filename are files; empty file parts (an untouched file
    /// input) are dropped. A trailing `[]` on a field name is ignored, so
    /// `images[]` and `images` collect into the same list.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let key = field_key(field.name().unwrap_or(""));
            if key.is_empty() {
                continue;
            }

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files
                        .entry(key)
                        .or_default()
                        .push(FilePart { file_name, bytes });
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.texts.entry(key).or_default().push(text);
                }
            }
        }

        Ok(form)
    }

    /// Last submitted value of a text field, trimmed. Blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.texts
            .get(name)
            .and_then(|values| values.last())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Like [`FormData::text`] but fails when the field is missing.
    pub fn required_text(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .ok_or_else(|| AppError::Core(CoreError::Validation(format!("'{name}' is required"))))
    }

    /// A list field, `None` when it was not submitted at all.
    ///
    /// Accepts a JSON-encoded array in a single value or one value per item.
    pub fn list(&mut self, name: &str) -> AppResult<Option<Vec<String>>> {
        match self.texts.remove(name) {
            Some(values) => Ok(Some(list_field::from_form_values(name, values)?)),
            None => Ok(None),
        }
    }

    /// A boolean field, `None` when absent or blank.
    pub fn flag(&self, name: &str) -> AppResult<Option<bool>> {
        match self.text(name) {
            Some(raw) => parse_flag(name, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Remove and return every file submitted under `name`.
    pub fn take_files(&mut self, name: &str) -> Vec<FilePart> {
        self.files.remove(name).unwrap_or_default()
    }

    /// Remove and return the single file submitted under `name`.
    pub fn take_file(&mut self, name: &str) -> AppResult<Option<FilePart>> {
        let mut files = self.take_files(name);
        match files.len() {
            0 => Ok(None),
            1 => Ok(files.pop()),
            n => Err(AppError::Core(CoreError::Validation(format!(
                "'{name}' accepts one file ({n} given)"
            )))),
        }
    }
}

fn field_key(name: &str) -> String {
    name.trim().trim_end_matches("[]").to_string()
}

fn parse_flag(name: &str, raw: &str) -> AppResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "'{name}' must be true or false (got '{raw}')"
        )))),
    }
}
