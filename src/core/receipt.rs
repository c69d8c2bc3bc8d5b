//! Receipt file validation and storage.
//!
//! Only images are accepted as receipts: the extension must be `png`, `jpg` or
//! `jpeg`, compared case-insensitively. Accepted files are written under the
//! receipts directory as `<key>-<file name>`.

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receipt extensions the form accepts
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Largest receipt accepted, in bytes
pub const MAX_RECEIPT_BYTES: u64 = 8 * 1024 * 1024;

/// A file selected in the new bill form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    /// Name of the file as selected by the user
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Where an uploaded receipt ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    /// Public location of the stored file
    pub file_url: String,
    /// Upload key, referenced by the bill on submission
    pub key: i64,
}

/// Returns the final path component of a user-supplied file name.
#[must_use]
pub fn base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
}

/// Returns true when the file name ends in an accepted image extension.
///
/// A name without a dot (`"png"`) or a bare dotfile (`".png"`) has no extension
/// and is rejected.
#[must_use]
pub fn is_accepted_receipt(file_name: &str) -> bool {
    Path::new(base_name(file_name))
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Fails with [`Error::InvalidFile`] unless [`is_accepted_receipt`] holds.
pub fn validate_receipt_name(file_name: &str) -> Result<()> {
    if is_accepted_receipt(file_name) {
        Ok(())
    } else {
        Err(Error::InvalidFile {
            file_name: file_name.to_string(),
        })
    }
}

/// Fails with [`Error::ReceiptTooLarge`] when `size` exceeds [`MAX_RECEIPT_BYTES`].
pub fn validate_receipt_size(size: u64) -> Result<()> {
    if size > MAX_RECEIPT_BYTES {
        Err(Error::ReceiptTooLarge {
            size,
            max: MAX_RECEIPT_BYTES,
        })
    } else {
        Ok(())
    }
}

/// Name a receipt is stored under: `<key>-<base name>`.
#[must_use]
pub fn stored_file_name(key: i64, file_name: &str) -> String {
    format!("{key}-{}", base_name(file_name))
}

/// Joins the public base URL and a stored file name.
#[must_use]
pub fn receipt_url(public_url: &str, stored_name: &str) -> String {
    format!("{}/{stored_name}", public_url.trim_end_matches('/'))
}

/// Writes receipt bytes into `directory`, creating it if needed.
pub async fn write_receipt(directory: &Path, stored_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(directory).await?;
    let path = directory.join(stored_name);
    tokio::fs::write(&path, bytes).await?;
    debug!("Wrote {} bytes to {:?}", bytes.len(), path);
    Ok(path)
}

/// Removes a stored receipt file. A file that is already gone is not an error.
pub async fn remove_receipt(directory: &Path, stored_name: &str) -> Result<()> {
    let path = directory.join(stored_name);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            debug!("Removed {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
