//! Versioned board document and migration from older layouts.

use airdrop_core::{BoardError, BoardResult};
use airdrop_domain::Board;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::traits::{FormatVersion, PersistenceMetadata};

/// Board document as written to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub columns: Board,
}

impl BoardDocument {
    pub fn new(board: Board, metadata: PersistenceMetadata) -> Self {
        Self {
            version: FormatVersion::CURRENT.as_u32(),
            metadata,
            columns: board,
        }
    }

    pub fn to_json_string(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BoardError::Serialization(e.to_string()))
    }

    /// Serializes `board` in the current layout without taking ownership of it.
    pub fn encode(board: &Board, metadata: &PersistenceMetadata) -> BoardResult<String> {
        let document = DocumentRef {
            version: FormatVersion::CURRENT.as_u32(),
            metadata,
            columns: board,
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| BoardError::Serialization(e.to_string()))
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    metadata: &'a PersistenceMetadata,
    columns: &'a Board,
}

/// Orchestrates reading documents written in any supported layout
pub struct Migrator;

impl Migrator {
    /// Detect the layout of a parsed document
    pub fn detect_version(value: &Value) -> BoardResult<FormatVersion> {
        if value.is_array() {
            return Ok(FormatVersion::V0);
        }
        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                BoardError::Serialization("board document has no version field".to_string())
            })?;
        u32::try_from(version)
            .ok()
            .and_then(FormatVersion::from_u32)
            .ok_or_else(|| {
                BoardError::Serialization(format!(
                    "board document version {} is newer than supported version {}",
                    version,
                    FormatVersion::CURRENT.as_u32()
                ))
            })
    }

    /// Parses stored text into a board, migrating older layouts in memory.
    /// The caller decides whether to write the current layout back.
    pub fn decode(raw: &str) -> BoardResult<(Board, FormatVersion)> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| BoardError::Serialization(e.to_string()))?;
        let version = Self::detect_version(&value)?;
        let board = match version {
            FormatVersion::V0 => Self::migrate_v0(value)?,
            FormatVersion::V1 => {
                let document: BoardDocument = serde_json::from_value(value)
                    .map_err(|e| BoardError::Serialization(e.to_string()))?;
                document.columns
            }
        };
        Ok((board, version))
    }

    fn migrate_v0(value: Value) -> BoardResult<Board> {
        let board: Board =
            serde_json::from_value(value).map_err(|e| BoardError::Serialization(e.to_string()))?;
        tracing::info!(
            columns = board.columns.len(),
            "migrating bare-array board document to version {}",
            FormatVersion::CURRENT.as_u32()
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_domain::Column;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_current_document_round_trip() {
        let board = Board::from_columns(vec![Column::new(1, "Todo", "", 1)]);
        let document = BoardDocument::new(board.clone(), PersistenceMetadata::new(Uuid::new_v4(), Utc::now()));
        let raw = document.to_json_string().unwrap();

        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], json!(1));
        assert!(value["columns"].is_array());

        let (decoded, version) = Migrator::decode(&raw).unwrap();
        assert_eq!(version, FormatVersion::V1);
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_bare_array_is_v0() {
        let raw = r##"[{"id": 3, "name": "Legacy", "color": "#dc2626", "order": 1, "cards": []}]"##;
        let (board, version) = Migrator::decode(raw).unwrap();
        assert_eq!(version, FormatVersion::V0);
        assert_eq!(board.columns[0].name, "Legacy");
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let raw = json!({"version": 9, "metadata": {}, "columns": []}).to_string();
        let err = Migrator::decode(&raw).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_object_without_version_is_rejected() {
        assert!(Migrator::decode(r#"{"columns": []}"#).is_err());
        assert!(Migrator::decode("{ invalid json }").is_err());
    }
}
