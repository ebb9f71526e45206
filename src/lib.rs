//! dagcache - proof-of-work dataset cache files
//!
//! Locates previously generated DAG datasets on disk, validates them, and
//! allocates correctly-sized files for the generator when they are missing
//! or untrustworthy.

pub mod cli;
pub mod config;
pub mod dag;
pub mod error;

pub use dag::{resolve, CacheIdentity, DagFile, Outcome, Resolution, SeedHash};
pub use error::{DagError, DagResult};
