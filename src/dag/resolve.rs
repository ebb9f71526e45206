//! Dataset file resolution
//!
//! Decides whether an on-disk dataset can be reused or must be regenerated,
//! and hands the caller an open, positioned file in either case.
//!
//! On-disk layout (native byte order, host-local only):
//!
//! ```text
//! offset 0 : 8-byte magic number
//! offset 8 : payload, exactly `required_size` bytes
//! length   : required_size + 8
//! ```

use crate::dag::fs::{ensure_directory, file_len};
use crate::dag::identity::CacheIdentity;
use crate::error::{DagError, DagResult};
use serde::Serialize;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Marks a dataset whose payload was fully written
pub const MAGIC: u64 = 0xFEE1_DEAD_BADD_CAFE;

/// Size of the magic number header in bytes
pub const MAGIC_SIZE: u64 = 8;

/// Status reported by a resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Existing file validated, payload can be reused
    Match,
    /// File freshly allocated, payload and magic must be written
    Mismatch,
    /// Existing file has the wrong size or header and cannot be trusted
    SizeMismatch,
    /// Setup or I/O failure, no file handed out
    Fail,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::SizeMismatch => "size-mismatch",
            Self::Fail => "fail",
        };
        write!(f, "{}", s)
    }
}

/// Why an existing dataset file was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntrustedReason {
    /// File length is not `required_size + 8`
    WrongLength { found: u64, expected: u64 },
    /// Header could not be read
    Unreadable(io::ErrorKind),
    /// Header present but not the magic number
    BadMagic { found: u64 },
}

impl fmt::Display for UntrustedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { found, expected } => {
                write!(f, "file is {} bytes, expected {}", found, expected)
            }
            Self::Unreadable(kind) => write!(f, "could not read header ({})", kind),
            Self::BadMagic { found } => write!(f, "bad magic number {:#018x}", found),
        }
    }
}

/// An existing dataset file that must not be reused
#[derive(Debug, Clone)]
pub struct Untrusted {
    pub path: PathBuf,
    pub reason: UntrustedReason,
}

impl Untrusted {
    /// Turn the report into an error for callers that refuse to continue
    pub fn into_error(self) -> DagError {
        DagError::UntrustedDataset {
            path: self.path,
            reason: self.reason.to_string(),
        }
    }
}

/// Open dataset file handed to the caller
///
/// Positioned at the start of the payload. Dropping it closes the file.
#[derive(Debug)]
pub struct DagFile {
    file: File,
    path: PathBuf,
    payload_size: u64,
}

impl DagFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Payload size in bytes, header excluded
    pub fn payload_size(&self) -> u64 {
        self.payload_size
    }

    /// Expected file length, header included
    pub fn total_len(&self) -> u64 {
        self.payload_size + MAGIC_SIZE
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn into_file(self) -> File {
        self.file
    }

    /// Write the magic number once the payload is complete
    ///
    /// Leaves the file positioned at the start of the payload.
    pub fn seal(&mut self) -> DagResult<()> {
        let result = (|| -> io::Result<()> {
            self.file.seek(SeekFrom::Start(0))?;
            self.file.write_all(&MAGIC.to_ne_bytes())?;
            self.file.flush()?;
            self.file.sync_data()?;
            self.file.seek(SeekFrom::Start(MAGIC_SIZE))?;
            Ok(())
        })();

        result.map_err(|e| DagError::Seal {
            path: self.path.clone(),
            source: e,
        })?;
        info!("Sealed dataset {}", self.path.display());
        Ok(())
    }
}

impl Read for DagFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for DagFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for DagFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

/// Result of a successful resolve; errors are the `Fail` outcome
#[derive(Debug)]
pub enum Resolution {
    /// Validated existing file, positioned after the header
    Match(DagFile),
    /// Newly allocated file, positioned after the header
    Mismatch(DagFile),
    /// Existing file rejected; it is left on disk untouched
    SizeMismatch(Untrusted),
}

impl Resolution {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Match(_) => Outcome::Match,
            Self::Mismatch(_) => Outcome::Mismatch,
            Self::SizeMismatch(_) => Outcome::SizeMismatch,
        }
    }

    /// Path of the dataset file this resolution is about
    pub fn path(&self) -> &Path {
        match self {
            Self::Match(f) | Self::Mismatch(f) => f.path(),
            Self::SizeMismatch(u) => &u.path,
        }
    }

    /// Take the open file, if one was handed out
    pub fn into_file(self) -> Option<DagFile> {
        match self {
            Self::Match(f) | Self::Mismatch(f) => Some(f),
            Self::SizeMismatch(_) => None,
        }
    }
}

/// Collapse a resolve result into its outcome
pub fn outcome_of(result: &DagResult<Resolution>) -> Outcome {
    match result {
        Ok(resolution) => resolution.outcome(),
        Err(_) => Outcome::Fail,
    }
}

/// Locate and validate a dataset file, or allocate a fresh one
///
/// With `force_create` the existing-file lookup is skipped and the file is
/// always recreated. An existing file is never modified unless forced.
pub fn resolve(
    dir: &Path,
    identity: &CacheIdentity,
    required_size: u64,
    force_create: bool,
) -> DagResult<Resolution> {
    ensure_directory(dir)?;
    let path = identity.path_in(dir)?;

    if !force_create {
        match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => return check_existing(file, path, required_size),
            Err(e) => debug!("No usable dataset at {}: {}", path.display(), e),
        }
    }

    create(path, required_size).map(Resolution::Mismatch)
}

fn check_existing(mut file: File, path: PathBuf, required_size: u64) -> DagResult<Resolution> {
    let found = match file_len(&file) {
        Ok(len) => len,
        Err(e) => return Err(DagError::SizeQuery { path, source: e }),
    };

    if found.checked_sub(MAGIC_SIZE) != Some(required_size) {
        debug!(
            "Dataset {} has length {}, expected {}",
            path.display(),
            found,
            required_size.saturating_add(MAGIC_SIZE)
        );
        return Ok(untrusted(
            path,
            UntrustedReason::WrongLength {
                found,
                expected: required_size.saturating_add(MAGIC_SIZE),
            },
        ));
    }

    if let Err(reason) = check_header(&mut file) {
        return Ok(untrusted(path, reason));
    }

    info!("Reusing dataset {}", path.display());
    Ok(Resolution::Match(DagFile {
        file,
        path,
        payload_size: required_size,
    }))
}

/// Read the 8-byte header and compare it to the magic number
fn check_header(reader: &mut impl Read) -> Result<(), UntrustedReason> {
    let mut header = [0u8; MAGIC_SIZE as usize];
    reader
        .read_exact(&mut header)
        .map_err(|e| UntrustedReason::Unreadable(e.kind()))?;

    match u64::from_ne_bytes(header) {
        MAGIC => Ok(()),
        found => Err(UntrustedReason::BadMagic { found }),
    }
}

fn untrusted(path: PathBuf, reason: UntrustedReason) -> Resolution {
    debug!("Rejecting dataset {}: {}", path.display(), reason);
    Resolution::SizeMismatch(Untrusted { path, reason })
}

fn create(path: PathBuf, required_size: u64) -> DagResult<DagFile> {
    let mut file = match OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) => return Err(DagError::Create { path, source: e }),
    };

    // Writing the last byte makes the filesystem materialize the full length.
    let allocated = required_size
        .checked_add(MAGIC_SIZE - 1)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "dataset size overflows the file offset",
            )
        })
        .and_then(|last| file.seek(SeekFrom::Start(last)))
        .and_then(|_| file.write_all(b"\n"));
    if let Err(e) = allocated {
        return Err(DagError::Allocate {
            path,
            size: required_size,
            source: e,
        });
    }

    if let Err(e) = file.flush().and_then(|_| file.sync_data()) {
        return Err(DagError::Flush { path, source: e });
    }

    if let Err(e) = file.seek(SeekFrom::Start(MAGIC_SIZE)) {
        return Err(DagError::io(
            format!("positioning dataset file {}", path.display()),
            e,
        ));
    }

    info!(
        "Allocated dataset {} ({} payload bytes)",
        path.display(),
        required_size
    );
    Ok(DagFile {
        file,
        path,
        payload_size: required_size,
    })
}
