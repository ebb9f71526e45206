//! On-disk dataset (DAG) cache
//!
//! Locates, validates and allocates the dataset files a proof-of-work miner
//! reuses across restarts. Each file is keyed by the epoch seed hash and the
//! format revision, so a new epoch or a layout change maps to a new file.
//!
//! # Trust Model
//!
//! - A file is reused only if its length is exactly `payload + 8` and its
//!   first 8 bytes hold the magic number
//! - The magic number is written by the generator after the payload, never
//!   by the resolver, so a crash mid-generation leaves an untrusted file
//! - Untrusted files are reported, not deleted; callers regenerate with
//!   `force_create`
//! - No locking: concurrent resolvers racing on one file are not coordinated
//!
//! # Outcomes
//!
//! | Outcome | File handed out | Description |
//! |---------|-----------------|-------------|
//! | Match | yes | Validated, payload can be read |
//! | Mismatch | yes | Freshly allocated, payload must be generated |
//! | SizeMismatch | no | Existing file has wrong size or header |
//! | Fail | no | Setup or I/O error |

pub mod fs;
pub mod identity;
pub mod params;
pub mod resolve;
pub mod store;

pub use identity::{CacheIdentity, SeedHash, DEFAULT_REVISION};
pub use params::{dataset_size, epoch_of};
pub use resolve::{
    outcome_of, resolve, DagFile, Outcome, Resolution, Untrusted, UntrustedReason, MAGIC,
    MAGIC_SIZE,
};
pub use store::{format_bytes, inspect, list, prune, DatasetEntry, Inspection};
