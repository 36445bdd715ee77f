use airdrop_core::{BoardError, BoardResult, KeyValueStore};
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{check_key, check_quota};

/// In-process store with the same key and quota rules as [`super::FileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota,
        }
    }

    fn lock(&self) -> BoardResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| BoardError::Internal("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BoardResult<Option<String>> {
        check_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BoardResult<()> {
        check_key(key)?;
        let mut entries = self.lock()?;
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        check_quota(key, others + value.len(), self.quota)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BoardResult<()> {
        check_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> BoardResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn size_bytes(&self) -> BoardResult<usize> {
        Ok(self.lock()?.values().map(String::len).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        store.set("language", "\"en\"").unwrap();
        assert_eq!(store.get("language").unwrap().as_deref(), Some("\"en\""));
        assert_eq!(store.keys().unwrap(), vec!["language".to_string()]);
        store.remove("language").unwrap();
        assert_eq!(store.size_bytes().unwrap(), 0);
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let store = MemoryStore::with_quota(Some(4));
        store.set("k", "1234").unwrap();
        assert!(matches!(
            store.set("k", "12345"),
            Err(BoardError::QuotaExceeded { .. })
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1234"));
    }
}
