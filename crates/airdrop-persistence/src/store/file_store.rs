use airdrop_core::{BoardResult, KeyValueStore};
use std::path::{Path, PathBuf};

use super::atomic_writer::AtomicWriter;
use super::{check_key, check_quota};

const EXTENSION: &str = "json";

/// Key/value store keeping one `<key>.json` file per key in a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            quota: None,
        }
    }

    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, EXTENSION))
    }

    fn entries(&self) -> BoardResult<Vec<(String, u64)>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if check_key(key).is_err() {
                continue;
            }
            let metadata = entry.metadata()?;
            if metadata.is_file() {
                entries.push((key.to_string(), metadata.len()));
            }
        }
        entries.sort();
        Ok(entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BoardResult<Option<String>> {
        check_key(key)?;
        AtomicWriter::read_to_string(&self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> BoardResult<()> {
        check_key(key)?;
        if self.quota.is_some() {
            let others: usize = self
                .entries()?
                .into_iter()
                .filter(|(k, _)| k != key)
                .map(|(_, len)| len as usize)
                .sum();
            check_quota(key, others + value.len(), self.quota)?;
        }
        AtomicWriter::write_atomic(&self.path_for(key), value.as_bytes())
    }

    fn remove(&self, key: &str) -> BoardResult<()> {
        check_key(key)?;
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> BoardResult<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|(key, _)| key).collect())
    }

    fn size_bytes(&self) -> BoardResult<usize> {
        Ok(self.entries()?.iter().map(|(_, len)| *len as usize).sum())
    }
}
