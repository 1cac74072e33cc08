//! # Shared Utility Functions
//!
//! Helpers for turning stored upload file names into URLs.
//!
//! Uploaded files are served by the backend host under fixed prefixes:
//! - `/uploads/items/<file>` for item photos
//! - `/uploads/bills/<file>` for purchase bills
//! - `/uploads/avatars/<file>` for profile pictures
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{upload_url, UploadKind};
//!
//! let url = upload_url("http://localhost:5001/", UploadKind::Bills, "bill_1.pdf");
//! assert_eq!(url, "http://localhost:5001/uploads/bills/bill_1.pdf");
//! ```

/// Folder an uploaded file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Items,
    Bills,
    Avatars,
}

impl UploadKind {
    pub fn folder(&self) -> &'static str {
        match self {
            UploadKind::Items => "items",
            UploadKind::Bills => "bills",
            UploadKind::Avatars => "avatars",
        }
    }
}

/// Build the public URL of an uploaded file.
///
/// Tolerates a trailing `/` on `host` and a leading `/` on `file_name`.
/// Values that are already absolute URLs are returned unchanged.
pub fn upload_url(host: &str, kind: UploadKind, file_name: &str) -> String {
    if file_name.starts_with("http://") || file_name.starts_with("https://") {
        return file_name.to_string();
    }
    format!(
        "{}/uploads/{}/{}",
        host.trim_end_matches('/'),
        kind.folder(),
        file_name.trim_start_matches('/')
    )
}
