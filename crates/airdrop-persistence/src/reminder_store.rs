use airdrop_core::{BoardError, BoardResult, Clock, KeyValueStore};
use airdrop_domain::{Reminder, ReminderStorage};
use std::sync::Arc;

use crate::keys::{corrupt_backup_key, REMINDERS_KEY};

/// Reminders are kept as a bare JSON array under their own key, apart from the board.
pub struct ReminderStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ReminderStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }
}

impl ReminderStorage for ReminderStore {
    fn load(&self) -> Vec<Reminder> {
        let raw = match self.kv.get(REMINDERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read reminders: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Reminder>>(&raw) {
            Ok(reminders) => reminders,
            Err(e) => {
                tracing::warn!("Stored reminders are unreadable, starting empty: {}", e);
                let backup_key = corrupt_backup_key(REMINDERS_KEY, self.clock.now());
                if let Err(e) = self.kv.set(&backup_key, &raw) {
                    tracing::error!("Could not back up unreadable reminders: {}", e);
                }
                Vec::new()
            }
        }
    }

    fn save(&self, reminders: &[Reminder]) -> BoardResult<()> {
        let json = serde_json::to_string_pretty(reminders)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        self.kv.set(REMINDERS_KEY, &json)
    }
}
