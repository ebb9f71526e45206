//! Filesystem helpers for dataset files

use crate::error::{DagError, DagResult};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;

/// Make sure the dataset directory exists, creating parents as needed
pub fn ensure_directory(dir: &Path) -> DagResult<()> {
    fs::create_dir_all(dir).map_err(|e| DagError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;
    debug!("Dataset directory ready: {}", dir.display());
    Ok(())
}

/// Current length of an open file in bytes
pub fn file_len(file: &File) -> io::Result<u64> {
    Ok(file.metadata()?.len())
}
