//! Persisted graph artifact: a single JSON file holding the ordered page list.

use super::Page;
use crate::error::StorageError;
use std::path::Path;
use tracing::debug;

/// Serialize pages exactly as they are written to disk.
pub fn encode_pages(pages: &[Page]) -> Result<Vec<u8>, StorageError> {
    let mut bytes = serde_json::to_vec_pretty(pages)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write the artifact, creating its directory if needed and replacing any previous file.
///
/// The file is written next to its destination first and then renamed into place, so readers
/// never observe a partially written graph.
pub fn write_pages(path: &Path, pages: &[Page]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = encode_pages(pages)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    std::fs::write(&staging, &bytes)?;
    std::fs::rename(&staging, path)?;
    debug!(path = %path.display(), pages = pages.len(), bytes = bytes.len(), "Wrote page graph");
    Ok(())
}

/// Load the whole artifact.
pub fn read_pages(path: &Path) -> Result<Vec<Page>, StorageError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::ArtifactNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}
