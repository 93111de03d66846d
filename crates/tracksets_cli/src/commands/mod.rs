//! CLI command implementations.

pub mod build;
pub mod count;
pub mod export;
pub mod inspect;

use std::path::Path;
use tracksets_core::ShardStore;
use tracksets_storage::DirectoryBackend;

/// Opens an existing shard directory for reading.
pub(crate) fn open_store(shards: &Path) -> Result<ShardStore, Box<dyn std::error::Error>> {
    let backend = DirectoryBackend::open(shards)?;
    Ok(ShardStore::new(Box::new(backend)))
}
