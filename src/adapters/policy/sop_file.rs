//! Loads the SOP document from the local filesystem.
//!
//! The SOP is read once at startup; the resulting [`SopDocument`] is shared
//! read-only for the life of the process.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::quality::SopDocument;

/// Errors loading the SOP.
#[derive(Debug, thiserror::Error)]
pub enum SopLoadError {
    #[error("Failed to read SOP at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SOP at {path} is empty")]
    Empty { path: PathBuf },
}

/// Reads and fingerprints the SOP at `path`.
///
/// # Errors
///
/// - `Unreadable` if the file cannot be read as UTF-8 text
/// - `Empty` if the file contains only whitespace
pub async fn load_sop(path: impl AsRef<Path>) -> Result<SopDocument, SopLoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| SopLoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let document = SopDocument::from_text(text);
    if document.is_blank() {
        return Err(SopLoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(document)
}
