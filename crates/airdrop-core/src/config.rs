use crate::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "airdrop-board";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the key/value files. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub validation: ValidationLimits,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Upper bound for all stored values together; `None` or `0` means unlimited.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quota_bytes: Some(5 * 1024 * 1024),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub toast_ms: u64,
    pub debounce_ms: u64,
    pub tick_ms: u64,
    pub max_columns: usize,
    pub max_cards_per_column: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: 3000,
            debounce_ms: 300,
            tick_ms: 16,
            max_columns: 10,
            max_cards_per_column: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub check_interval_secs: u64,
    pub prune_after_days: i64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            prune_after_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_title_length: usize,
    pub max_description_length: usize,
    pub max_tag_length: usize,
    pub max_tags: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_title_length: 100,
            max_description_length: 500,
            max_tag_length: 20,
            max_tags: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "airdropboard-backup".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub theme: String,
    pub language: String,
    pub column_color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            language: "pt".to_string(),
            column_color: "#2563eb".to_string(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config").join(APP_DIR).join("config.toml"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|config| config.join(APP_DIR).join("config.toml"))
        }
    }

    /// Loads the user config, falling back to defaults when absent or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Loads an explicitly requested config file; unlike [`AppConfig::load`] a
    /// malformed file is an error.
    pub fn load_from(path: &Path) -> BoardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> BoardResult<Self> {
        toml::from_str(content).map_err(|e| BoardError::Validation(format!("config: {}", e)))
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
    }

    pub fn export_filename(&self, date: chrono::NaiveDate) -> String {
        format!(
            "{}-{}.json",
            self.export.filename_prefix,
            date.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.ui.debounce_ms, 300);
        assert_eq!(config.notifications.check_interval_secs, 60);
        assert_eq!(config.notifications.prune_after_days, 7);
        assert_eq!(config.validation.max_title_length, 100);
        assert_eq!(config.defaults.language, "pt");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"
            data_dir = "/tmp/board"

            [ui]
            debounce_ms = 150

            [export]
            filename_prefix = "drops"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/board")));
        assert_eq!(config.ui.debounce_ms, 150);
        assert_eq!(config.ui.toast_ms, 3000);
        assert_eq!(config.export.filename_prefix, "drops");
        assert_eq!(config.validation.max_tags, 10);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = AppConfig::parse("[ui\ndebounce_ms = ");
        assert!(matches!(result, Err(BoardError::Validation(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nquota_bytes = 2048\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.storage.quota_bytes, Some(2048));
    }

    #[test]
    fn test_export_filename_embeds_date() {
        let config = AppConfig::default();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            config.export_filename(date),
            "airdropboard-backup-2024-03-09.json"
        );
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/airdrops")),
            ..AppConfig::default()
        };
        assert_eq!(config.effective_data_dir(), PathBuf::from("/srv/airdrops"));
    }
}
