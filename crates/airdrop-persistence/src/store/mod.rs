pub mod atomic_writer;
pub mod file_store;
pub mod memory_store;

pub use atomic_writer::AtomicWriter;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use airdrop_core::{BoardError, BoardResult};

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn check_key(key: &str) -> BoardResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(BoardError::Storage(format!("invalid storage key '{}'", key)))
    }
}

/// Quota check shared by both stores. `limit` of `None` or `0` disables it.
pub(crate) fn check_quota(
    key: &str,
    total_after: usize,
    limit: Option<usize>,
) -> BoardResult<()> {
    match limit {
        Some(limit) if limit > 0 && total_after > limit => Err(BoardError::QuotaExceeded {
            key: key.to_string(),
            needed: total_after,
            limit,
        }),
        _ => Ok(()),
    }
}
