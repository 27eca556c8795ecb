//! Client-side upload validation.
//!
//! Uploads are checked locally before any network call: the MIME type must be
//! CSV or Excel and the file must not exceed 50 MiB. Violations are rejected
//! with an `UploadValidation` error without contacting the backend.

use crate::error::{DeckError, Result};
use std::path::Path;

/// Maximum accepted upload size in bytes (50 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// MIME types the backend accepts.
pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "text/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Infers the MIME type of an upload candidate from its file extension.
///
/// A native client has no browser to supply the type, so the extension is the
/// only signal. Unknown extensions map to `application/octet-stream`, which
/// fails validation.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => "text/csv",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Validates an upload candidate locally.
///
/// # Errors
///
/// Returns `DeckError::UploadValidation` when the MIME type is not one of
/// [`ALLOWED_MIME_TYPES`] or the size exceeds [`MAX_UPLOAD_BYTES`].
pub fn validate_upload(mime: &str, size: u64) -> Result<()> {
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(DeckError::upload_validation(
            "Please upload a CSV or Excel file",
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(DeckError::upload_validation(
            "File size must be less than 50MB",
        ));
    }
    Ok(())
}
