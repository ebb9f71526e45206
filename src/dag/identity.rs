//! Dataset identity and file naming
//!
//! A dataset is identified by the seed hash of its epoch plus the format
//! revision of the file layout. Same identity = same file name.

use crate::error::{DagError, DagResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Format revision written into every dataset file name
pub const DEFAULT_REVISION: u32 = 23;

/// Prefix shared by every dataset file name
pub const FILE_PREFIX: &str = "full-R";

/// Seed hash length in bytes
pub const SEED_HASH_LEN: usize = 32;

/// Number of leading seed bytes that appear in the file name
const NAME_SEED_BYTES: usize = 8;

/// Per-epoch seed hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SeedHash([u8; SEED_HASH_LEN]);

impl SeedHash {
    pub const fn new(bytes: [u8; SEED_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_HASH_LEN] {
        &self.0
    }

    /// Hex of the leading bytes used in file names (16 chars)
    pub fn name_prefix(&self) -> String {
        hex::encode(&self.0[..NAME_SEED_BYTES])
    }
}

impl FromStr for SeedHash {
    type Err = DagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let mut bytes = [0u8; SEED_HASH_LEN];
        hex::decode_to_slice(trimmed, &mut bytes)
            .map_err(|e| DagError::InvalidSeedHash(format!("'{s}': {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SeedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Seed hash plus format revision; maps to exactly one file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheIdentity {
    pub seed: SeedHash,
    pub revision: u32,
}

impl CacheIdentity {
    /// Identity at the current format revision
    pub fn new(seed: SeedHash) -> Self {
        Self::with_revision(seed, DEFAULT_REVISION)
    }

    pub fn with_revision(seed: SeedHash, revision: u32) -> Self {
        Self { seed, revision }
    }

    /// File name of the dataset, e.g. `full-R23-290decd9548b62a8`
    pub fn file_name(&self) -> String {
        format!("{}{}-{}", FILE_PREFIX, self.revision, self.seed.name_prefix())
    }

    /// Full path of the dataset inside `dir`
    pub fn path_in(&self, dir: &Path) -> DagResult<PathBuf> {
        if dir.as_os_str().is_empty() {
            return Err(DagError::InvalidPath {
                path: dir.to_path_buf(),
                reason: "dataset directory is empty".to_string(),
            });
        }
        Ok(dir.join(self.file_name()))
    }
}

/// Parse a dataset file name back into `(revision, seed name prefix)`
///
/// Returns `None` for anything that was not produced by [`CacheIdentity::file_name`].
pub fn parse_file_name(name: &str) -> Option<(u32, String)> {
    let rest = name.strip_prefix(FILE_PREFIX)?;
    let (revision, prefix) = rest.split_once('-')?;
    if revision.is_empty() || !revision.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let revision = revision.parse().ok()?;
    if prefix.len() != NAME_SEED_BYTES * 2
        || !prefix.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return None;
    }
    Some((revision, prefix.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(first: u8) -> SeedHash {
        let mut bytes = [0u8; SEED_HASH_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = first.wrapping_add(i as u8);
        }
        SeedHash::new(bytes)
    }

    #[test]
    fn file_name_format() {
        let identity = CacheIdentity::new(seed(0xa0));
        assert_eq!(identity.file_name(), "full-R23-a0a1a2a3a4a5a6a7");
    }

    #[test]
    fn file_name_zero_seed() {
        let identity = CacheIdentity::new(SeedHash::default());
        assert_eq!(identity.file_name(), "full-R23-0000000000000000");
    }

    #[test]
    fn file_name_deterministic() {
        let a = CacheIdentity::new(seed(7));
        let b = CacheIdentity::new(seed(7));
        assert_eq!(a.file_name(), b.file_name());
    }

    #[test]
    fn file_name_differs_by_revision_and_seed() {
        let base = CacheIdentity::new(seed(1));
        assert_ne!(
            base.file_name(),
            CacheIdentity::with_revision(seed(1), 22).file_name()
        );
        assert_ne!(base.file_name(), CacheIdentity::new(seed(2)).file_name());
    }

    #[test]
    fn path_in_joins_directory() {
        let identity = CacheIdentity::new(SeedHash::default());
        let path = identity.path_in(Path::new("/tmp/cache")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/cache/full-R23-0000000000000000"));
    }

    #[test]
    fn path_in_rejects_empty_dir() {
        let identity = CacheIdentity::new(SeedHash::default());
        let err = identity.path_in(Path::new("")).unwrap_err();
        assert!(matches!(err, DagError::InvalidPath { .. }));
    }

    #[test]
    fn seed_parses_hex() {
        let hex_str = "0x".to_string() + &"ab".repeat(32);
        let parsed: SeedHash = hex_str.parse().unwrap();
        assert_eq!(parsed.as_bytes(), &[0xab; 32]);
        assert_eq!(parsed.to_string(), "ab".repeat(32));
    }

    #[test]
    fn seed_rejects_wrong_length() {
        assert!("abcd".parse::<SeedHash>().is_err());
        assert!("zz".repeat(32).parse::<SeedHash>().is_err());
    }

    #[test]
    fn parse_file_name_roundtrip() {
        let identity = CacheIdentity::with_revision(seed(0x10), 23);
        let (revision, prefix) = parse_file_name(&identity.file_name()).unwrap();
        assert_eq!(revision, 23);
        assert_eq!(prefix, identity.seed.name_prefix());
    }

    #[test]
    fn parse_file_name_rejects_foreign() {
        assert!(parse_file_name("config.toml").is_none());
        assert!(parse_file_name("full-R-0000000000000000").is_none());
        assert!(parse_file_name("full-R23-0000").is_none());
        assert!(parse_file_name("full-R23-000000000000000G").is_none());
        assert!(parse_file_name("full-Rx-0000000000000000").is_none());
    }
}
