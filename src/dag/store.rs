//! Dataset directory housekeeping
//!
//! Read-only inspection of dataset files, listing of a dataset directory and
//! pruning of stale datasets. The resolver itself never deletes anything;
//! removal only happens here, on explicit request.

use crate::dag::identity::parse_file_name;
use crate::dag::resolve::{Outcome, MAGIC, MAGIC_SIZE};
use crate::error::{DagError, DagResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Format bytes as human-readable size (e.g., "1.5 GB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Read-only view of one dataset file
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub path: PathBuf,
    /// File length including the header
    pub length: u64,
    /// Whether the header holds the magic number
    pub sealed: bool,
    /// What a non-forced resolve with `expected_size` would report, if given
    pub outcome: Option<Outcome>,
}

/// A dataset file found in a directory
#[derive(Debug, Clone, Serialize)]
pub struct DatasetEntry {
    pub path: PathBuf,
    pub revision: u32,
    /// Hex of the leading seed bytes, as encoded in the file name
    pub seed_prefix: String,
    pub length: u64,
    pub sealed: bool,
    pub modified: DateTime<Utc>,
}

impl DatasetEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Payload size implied by the file length
    pub fn payload_size(&self) -> u64 {
        self.length.saturating_sub(MAGIC_SIZE)
    }
}

/// Check whether a file carries the magic number, without modifying it
fn read_sealed(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut header = [0u8; MAGIC_SIZE as usize];
    match file.read_exact(&mut header) {
        Ok(()) => Ok(u64::from_ne_bytes(header) == MAGIC),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Inspect a dataset file without opening it for writing
pub fn inspect(path: &Path, expected_size: Option<u64>) -> DagResult<Inspection> {
    let length = fs::metadata(path)
        .map_err(|e| DagError::io(format!("reading metadata of {}", path.display()), e))?
        .len();
    let sealed = read_sealed(path)
        .map_err(|e| DagError::io(format!("reading header of {}", path.display()), e))?;

    let outcome = expected_size.map(|size| {
        if length.checked_sub(MAGIC_SIZE) == Some(size) && sealed {
            Outcome::Match
        } else {
            Outcome::SizeMismatch
        }
    });

    Ok(Inspection {
        path: path.to_path_buf(),
        length,
        sealed,
        outcome,
    })
}

/// List dataset files in a directory, newest first
///
/// Files whose names were not produced by the dataset naming scheme are
/// ignored. A missing directory yields an empty list.
pub fn list(dir: &Path) -> DagResult<Vec<DatasetEntry>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Dataset directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(DagError::io(
                format!("reading dataset directory {}", dir.display()),
                e,
            ))
        }
    };

    let mut entries = Vec::new();
    for item in read_dir {
        let item = item.map_err(|e| {
            DagError::io(format!("reading dataset directory {}", dir.display()), e)
        })?;
        let name = item.file_name();
        let Some((revision, seed_prefix)) = name.to_str().and_then(parse_file_name) else {
            continue;
        };

        let path = item.path();
        let metadata = item
            .metadata()
            .map_err(|e| DagError::io(format!("reading metadata of {}", path.display()), e))?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_default();
        let sealed = read_sealed(&path)
            .map_err(|e| DagError::io(format!("reading header of {}", path.display()), e))?;

        entries.push(DatasetEntry {
            path,
            revision,
            seed_prefix,
            length: metadata.len(),
            sealed,
            modified,
        });
    }

    entries.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
    debug!("Found {} datasets in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Remove stale datasets, keeping the `keep` newest of `revision`
///
/// Datasets of any other revision are always removed. Returns the entries
/// that were (or, with `dry_run`, would be) removed.
pub fn prune(
    dir: &Path,
    revision: u32,
    keep: usize,
    dry_run: bool,
) -> DagResult<Vec<DatasetEntry>> {
    let mut kept = 0usize;
    let mut stale = Vec::new();

    for entry in list(dir)? {
        if entry.revision == revision && kept < keep {
            kept += 1;
            continue;
        }
        stale.push(entry);
    }

    if dry_run {
        return Ok(stale);
    }

    for entry in &stale {
        debug!("Removing dataset: {}", entry.path.display());
        fs::remove_file(&entry.path).map_err(|e| {
            DagError::io(format!("removing dataset {}", entry.path.display()), e)
        })?;
    }

    if !stale.is_empty() {
        info!("Removed {} stale dataset(s) from {}", stale.len(), dir.display());
    }
    Ok(stale)
}
