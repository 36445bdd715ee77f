mod file_watcher;

pub use file_watcher::FileWatcher;
