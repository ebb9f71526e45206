//! CLI command implementations

pub mod config;
pub mod inspect;
pub mod list;
pub mod path;
pub mod prepare;
pub mod prune;

pub use config::execute as config;
pub use inspect::execute as inspect;
pub use list::execute as list;
pub use path::execute as path;
pub use prepare::execute as prepare;
pub use prune::execute as prune;

use crate::cli::args::IdentityArgs;
use crate::config::Config;
use crate::dag::params::MAX_EPOCH;
use crate::dag::{dataset_size, CacheIdentity};
use crate::error::{DagError, DagResult};
use std::path::PathBuf;

/// Dataset directory from the flag, falling back to config
fn dataset_dir(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| config.dataset.resolved_dir())
}

/// Identity and directory selected by the common flags
fn select(args: &IdentityArgs, config: &Config) -> (PathBuf, CacheIdentity) {
    let revision = args.revision.unwrap_or(config.dataset.revision);
    (
        dataset_dir(args.dir.clone(), config),
        CacheIdentity::with_revision(args.seed, revision),
    )
}

/// Payload size from an explicit byte count or an epoch
fn payload_size(size: Option<u64>, epoch: Option<u64>) -> DagResult<Option<u64>> {
    match (size, epoch) {
        (Some(size), _) => Ok(Some(size)),
        (None, Some(epoch)) => dataset_size(epoch).map(Some).ok_or_else(|| {
            DagError::User(format!("Epoch {epoch} is too large (max {MAX_EPOCH})"))
        }),
        (None, None) => Ok(None),
    }
}

/// Run blocking file I/O off the async runtime
async fn blocking<T, F>(f: F) -> DagResult<T>
where
    F: FnOnce() -> DagResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DagError::Internal(format!("blocking task failed: {e}")))?
}
