use airdrop_core::{BoardResult, Clock, KeyValueStore};
use airdrop_domain::{Board, BoardStorage};
use std::sync::Arc;
use uuid::Uuid;

use crate::envelope::{BoardDocument, Migrator};
use crate::keys::{corrupt_backup_key, BOARD_KEY};
use crate::traits::{FormatVersion, PersistenceMetadata};

/// Board persistence over any key/value store.
///
/// Loading never fails: a missing document is an empty board, and an unreadable
/// one is copied aside under a `.corrupt-<timestamp>` key first so the next
/// save cannot destroy it.
pub struct BoardStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    instance_id: Uuid,
}

impl BoardStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            kv,
            clock,
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    fn set_aside(&self, raw: &str) {
        let backup_key = corrupt_backup_key(BOARD_KEY, self.clock.now());
        match self.kv.set(&backup_key, raw) {
            Ok(()) => tracing::warn!("Unreadable board saved aside as '{}'", backup_key),
            Err(e) => tracing::error!("Could not back up unreadable board: {}", e),
        }
    }
}

impl BoardStorage for BoardStore {
    fn load(&self) -> Board {
        let raw = match self.kv.get(BOARD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored board, starting empty");
                return Board::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read stored board, starting empty: {}", e);
                return Board::new();
            }
        };
        match Migrator::decode(&raw) {
            Ok((board, version)) => {
                if version < FormatVersion::CURRENT {
                    tracing::info!(
                        "Board stored as version {}, next save writes version {}",
                        version.as_u32(),
                        FormatVersion::CURRENT.as_u32()
                    );
                }
                board
            }
            Err(e) => {
                tracing::warn!("Stored board is unreadable, starting empty: {}", e);
                self.set_aside(&raw);
                Board::new()
            }
        }
    }

    fn save(&self, board: &Board) -> BoardResult<()> {
        let metadata = PersistenceMetadata::new(self.instance_id, self.clock.now());
        let json = BoardDocument::encode(board, &metadata)?;
        self.kv.set(BOARD_KEY, &json)?;
        tracing::debug!("Saved board ({} bytes)", json.len());
        Ok(())
    }
}
