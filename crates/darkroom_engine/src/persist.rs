use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("destination directory missing or not writable: {0}")]
    Destination(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Atomically write `bytes` to `destination` by writing a temp file in the
/// same directory and renaming it into place.
pub fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<PathBuf, PersistError> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|err| PersistError::Destination(err.to_string()))?;
    }

    let mut tmp =
        NamedTempFile::new_in(&dir).map_err(|err| PersistError::Destination(err.to_string()))?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace an existing file if present; a re-download overwrites.
    if destination.exists() {
        fs::remove_file(destination)?;
    }
    tmp.persist(destination).map_err(|err| PersistError::Io(err.error))?;
    Ok(destination.to_path_buf())
}
