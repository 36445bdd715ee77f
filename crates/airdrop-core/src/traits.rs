use crate::BoardResult;

/// String key/value storage backing every persisted document.
///
/// Values are whole documents; a `set` replaces the previous value atomically
/// or fails without touching it.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> BoardResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> BoardResult<()>;

    fn remove(&self, key: &str) -> BoardResult<()>;

    fn keys(&self) -> BoardResult<Vec<String>>;

    /// Total bytes currently held across all keys.
    fn size_bytes(&self) -> BoardResult<usize>;
}
