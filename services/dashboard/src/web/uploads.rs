//! services/dashboard/src/web/uploads.rs
//!
//! Collects a `multipart/form-data` body into text fields and file uploads.

use axum::extract::Multipart;
use std::collections::HashMap;
use travel_portal_core::domain::Upload;

#[derive(Debug, Default)]
pub struct MultipartFields {
    texts: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl MultipartFields {
    /// Reads every part. Parts with a file name become uploads; the rest are text.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, String> {
        let mut fields = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| format!("Gagal membaca formulir: {}", e))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Gagal membaca file: {}", e))?;
                if bytes.is_empty() {
                    continue;
                }
                fields.files.insert(
                    name,
                    Upload {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| format!("Gagal membaca formulir: {}", e))?;
                fields.texts.insert(name, text);
            }
        }
        Ok(fields)
    }

    /// A trimmed text field; empty values count as missing.
    pub fn text(&self, name: &str) -> Option<String> {
        self.texts
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }
}
