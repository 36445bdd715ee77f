use airdrop_core::BoardResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Metadata written alongside every saved board document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// ID of the process that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid, saved_at: DateTime<Utc>) -> Self {
        Self {
            instance_id,
            saved_at,
        }
    }
}

/// Trait for detecting changes to the storage file
/// Used to reload the board when another process writes it
#[async_trait]
pub trait ChangeDetector: Send + Sync {
    /// Start watching the file for changes
    async fn start_watching(&self, path: PathBuf) -> BoardResult<()>;

    /// Stop watching the file
    async fn stop_watching(&self) -> BoardResult<()>;

    /// Subscribe to change events
    fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ChangeEvent>;

    /// Check if currently watching
    fn is_watching(&self) -> bool;
}

/// Event indicating a change to the watched file
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub detected_at: DateTime<Utc>,
}

/// Layouts of the persisted board document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    /// Bare array of columns, no envelope. Also the export layout.
    V0,
    /// `{version, metadata, columns}` envelope.
    V1,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    pub fn as_u32(self) -> u32 {
        match self {
            Self::V0 => 0,
            Self::V1 => 1,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::V0),
            1 => Some(Self::V1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version_round_trip() {
        for version in [FormatVersion::V0, FormatVersion::V1] {
            assert_eq!(FormatVersion::from_u32(version.as_u32()), Some(version));
        }
        assert_eq!(FormatVersion::from_u32(7), None);
        assert!(FormatVersion::V0 < FormatVersion::CURRENT);
    }
}
