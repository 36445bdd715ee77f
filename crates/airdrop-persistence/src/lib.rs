pub mod board_store;
pub mod envelope;
pub mod keys;
pub mod preference_store;
pub mod reminder_store;
pub mod store;
pub mod traits;
pub mod watch;

pub use board_store::BoardStore;
pub use envelope::{BoardDocument, Migrator};
pub use preference_store::PreferenceStore;
pub use reminder_store::ReminderStore;
pub use store::{AtomicWriter, FileStore, MemoryStore};
pub use traits::{ChangeDetector, ChangeEvent, FormatVersion, PersistenceMetadata};
pub use watch::FileWatcher;
