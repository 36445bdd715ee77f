use crate::traits::{ChangeDetector, ChangeEvent};
use airdrop_core::{BoardError, BoardResult};
use chrono::Utc;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::Mutex;

/// Watches one storage file so another process's saves can be picked up.
///
/// The parent directory is watched rather than the file itself, since saves
/// replace the file by renaming a temp file over it.
pub struct FileWatcher {
    tx: broadcast::Sender<ChangeEvent>,
    task_handle: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl FileWatcher {
    /// The broadcast channel has a buffer size of 10
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(10);
        Self {
            tx,
            task_handle: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute form of `path` that matches OS event paths, even before the file exists.
async fn resolve_watch_path(path: &Path) -> BoardResult<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| BoardError::Validation(format!("not a file path: {}", path.display())))?
        .to_owned();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent).await?;
    let parent = tokio::fs::canonicalize(&parent).await?;
    let file = parent.join(file_name);
    Ok((parent, file))
}

fn is_write(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

#[async_trait::async_trait]
impl ChangeDetector for FileWatcher {
    async fn start_watching(&self, path: PathBuf) -> BoardResult<()> {
        self.stop_watching().await?;
        let (parent, watch_path) = resolve_watch_path(&path).await?;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let event_path = watch_path.clone();
            let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                match res {
                    Ok(event) => {
                        if is_write(&event.kind) && event.paths.iter().any(|p| p == &event_path) {
                            let change = ChangeEvent {
                                path: event_path.clone(),
                                detected_at: Utc::now(),
                            };
                            let _ = tx.send(change);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("File watcher error: {}", e);
                    }
                }
            });
            match watcher {
                Ok(mut watcher) => {
                    if let Err(e) = watcher.watch(&parent, RecursiveMode::NonRecursive) {
                        tracing::error!("Failed to watch directory: {}", e);
                    } else {
                        tracing::info!("Watching {} for external changes", watch_path.display());
                        // Keep watcher alive
                        std::future::pending::<()>().await;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to create watcher: {}", e);
                }
            }
        });

        *self.task_handle.lock().await = Some(handle);
        Ok(())
    }

    async fn stop_watching(&self) -> BoardResult<()> {
        let mut guard = self.task_handle.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
            tracing::info!("Stopped file watching");
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    fn is_watching(&self) -> bool {
        match self.task_handle.try_lock() {
            Ok(guard) => guard.as_ref().is_some_and(|h| !h.is_finished()),
            // Locked means start or stop is in flight
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AtomicWriter;
    use tempfile::tempdir;
    use tokio::time::{sleep, Duration};

    #[tokio::test]
    async fn test_file_watcher_sees_atomic_replace() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("airdrop-board.json");
        tokio::fs::write(&file_path, b"[]").await.unwrap();

        let watcher = FileWatcher::new();
        let mut rx = watcher.subscribe();
        watcher.start_watching(file_path.clone()).await.unwrap();
        assert!(watcher.is_watching());

        sleep(Duration::from_millis(100)).await;
        AtomicWriter::write_atomic(&file_path, b"[{\"id\":1}]").unwrap();

        let result = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        watcher.stop_watching().await.unwrap();
        assert!(!watcher.is_watching());

        // Delivery timing is platform-dependent
        if let Ok(Ok(event)) = result {
            assert_eq!(event.path.file_name(), file_path.file_name());
        }
    }

    #[tokio::test]
    async fn test_watching_a_file_that_does_not_exist_yet() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("airdrop-board.json");

        let watcher = FileWatcher::new();
        watcher.start_watching(file_path).await.unwrap();
        assert!(dir.path().join("nested").is_dir());
        watcher.stop_watching().await.unwrap();
    }
}
