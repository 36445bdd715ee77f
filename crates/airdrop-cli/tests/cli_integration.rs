use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// A scratch data directory plus an explicit config file, so the user's own
/// config and data are never touched.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(content: &str) -> Self {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, content).unwrap();
        Self { dir, config }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn airdrop(&self) -> Command {
        let mut cmd = Command::cargo_bin("airdrop").unwrap();
        cmd.env_remove("AIRDROP_DATA_DIR")
            .env_remove("AIRDROP_CONFIG")
            .env_remove("AIRDROP_DEBUG_LOG")
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn ok(&self, args: &[&str]) -> Value {
        let output = self
            .airdrop()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert!(json["success"].as_bool().unwrap(), "{:?} failed: {}", args, json);
        json["data"].clone()
    }

    fn fail(&self, args: &[&str]) -> String {
        let output = self
            .airdrop()
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stderr
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert_eq!(json["success"], false);
        json["error"].as_str().unwrap().to_string()
    }

    fn add_column(&self, name: &str) -> String {
        self.ok(&["column", "add", "--name", name])["id"].to_string()
    }

    fn add_card(&self, column: &str, title: &str, extra: &[&str]) -> String {
        let mut args = vec!["card", "add", "--column", column, "--title", title];
        args.extend_from_slice(extra);
        self.ok(&args)["id"].to_string()
    }
}

fn parse_json_output(output: &str) -> Value {
    let line = output
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with('{'))
        .expect("no JSON object in output");
    serde_json::from_str(line).expect("Failed to parse JSON output")
}

mod column_tests {
    use super::*;

    #[test]
    fn test_column_add_uses_default_color() {
        let ws = Workspace::new();
        let column = ws.ok(&["column", "add", "--name", "Testnets"]);
        assert_eq!(column["name"], "Testnets");
        assert_eq!(column["color"], "#2563eb");
        assert_eq!(column["cards"], 0);
    }

    #[test]
    fn test_column_list_follows_reorder() {
        let ws = Workspace::new();
        ws.add_column("Todo");
        ws.add_column("Doing");
        let done = ws.add_column("Done");

        ws.ok(&["column", "reorder", "--id", &done, "--position", "1"]);

        let list = ws.ok(&["column", "list"]);
        assert_eq!(list["count"], 3);
        let names: Vec<&str> = list["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Done", "Todo", "Doing"]);
    }

    #[test]
    fn test_column_edit_keeps_unspecified_fields() {
        let ws = Workspace::new();
        let id = ws.ok(&["column", "add", "--name", "Old", "--color", "#16a34a"])["id"].to_string();
        let column = ws.ok(&["column", "edit", "--id", &id, "--name", "New"]);
        assert_eq!(column["name"], "New");
        assert_eq!(column["color"], "#16a34a");
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let ws = Workspace::new();
        ws.fail(&["column", "add", "--name", "Bad", "--color", "blue"]);
        assert_eq!(ws.ok(&["column", "list"])["count"], 0);
    }

    #[test]
    fn test_remove_column_requires_yes() {
        let ws = Workspace::new();
        let id = ws.add_column("Claimed");
        ws.add_card(&id, "Arbitrum", &[]);
        ws.add_card(&id, "Optimism", &[]);

        let error = ws.fail(&["column", "remove", "--id", &id]);
        assert!(error.contains("Claimed"));
        assert!(error.contains("--yes"));
        assert_eq!(ws.ok(&["column", "list"])["count"], 1);

        let removed = ws.ok(&["column", "remove", "--id", &id, "--yes"]);
        assert_eq!(removed["cardsRemoved"], 2);
        assert_eq!(ws.ok(&["card", "list"])["count"], 0);
    }

    #[test]
    fn test_configured_column_limit() {
        let ws = Workspace::with_config("[ui]\nmax_columns = 1\n");
        ws.add_column("Only");
        ws.fail(&["column", "add", "--name", "Second"]);
        assert_eq!(ws.ok(&["column", "list"])["count"], 1);
    }
}

mod card_tests {
    use super::*;

    #[test]
    fn test_card_add_with_all_fields() {
        let ws = Workspace::new();
        let column = ws.add_column("Todo");
        let card = ws.ok(&[
            "card",
            "add",
            "--column",
            &column,
            "--title",
            "LayerZero",
            "--tags",
            "DeFi, L0",
            "--due",
            "2030-07-01",
            "--priority",
            "high",
            "--link",
            "https://layerzero.network",
            "--item",
            "bridge",
            "--item",
            "swap",
        ]);

        assert_eq!(card["columnId"].to_string(), column);
        assert_eq!(card["title"], "LayerZero");
        assert_eq!(card["tags"], serde_json::json!(["DeFi", "L0"]));
        assert_eq!(card["priority"], "High");
        assert_eq!(card["status"], "InProgress");
        assert_eq!(card["checklist"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_card_move_check_and_get() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        let done = ws.add_column("Done");
        let id = ws.add_card(&todo, "Starknet", &["--item", "claim"]);

        let moved = ws.ok(&["card", "move", "--id", &id, "--to", &done]);
        assert_eq!(moved["columnId"].to_string(), done);

        let checked = ws.ok(&["card", "check", "--id", &id, "--item", "1"]);
        assert_eq!(checked["checklist"][0]["done"], true);

        let fetched = ws.ok(&["card", "get", "--id", &id]);
        assert_eq!(fetched["columnId"].to_string(), done);
        assert_eq!(fetched["checklist"][0]["done"], true);
    }

    #[test]
    fn test_card_move_to_missing_column_fails() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        let id = ws.add_card(&todo, "Linea", &[]);
        ws.fail(&["card", "move", "--id", &id, "--to", "999"]);
        assert_eq!(ws.ok(&["card", "get", "--id", &id])["columnId"].to_string(), todo);
    }

    #[test]
    fn test_card_edit_and_clear_due() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        let id = ws.add_card(&todo, "Scroll", &["--due", "2030-01-01"]);

        let edited = ws.ok(&["card", "edit", "--id", &id, "--status", "done", "--clear-due"]);
        assert_eq!(edited["status"], "Done");
        assert!(edited.get("dueDate").map_or(true, Value::is_null));

        let error = ws.fail(&["card", "edit", "--id", &id]);
        assert!(error.contains("Nothing to update"));
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        let id = ws.add_card(&todo, "zkSync", &["--tags", "L2"]);

        let copy = ws.ok(&["card", "duplicate", "--id", &id]);
        assert_ne!(copy["id"].to_string(), id);
        assert!(copy["title"].as_str().unwrap().starts_with("zkSync"));
        assert_eq!(copy["tags"], serde_json::json!(["L2"]));
        assert_eq!(ws.ok(&["card", "list"])["count"], 2);
    }

    #[test]
    fn test_remove_card_requires_yes() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        let id = ws.add_card(&todo, "Blast", &[]);

        let error = ws.fail(&["card", "remove", "--id", &id]);
        assert!(error.contains("Blast"));
        ws.ok(&["card", "get", "--id", &id]);

        let removed = ws.ok(&["card", "remove", "--id", &id, "--yes"]);
        assert_eq!(removed["title"], "Blast");
        let error = ws.fail(&["card", "get", "--id", &id]);
        assert!(error.contains("Card not found"));
    }

    #[test]
    fn test_card_list_filters() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        let other = ws.add_column("Other");
        ws.add_card(&todo, "Alpha Drop", &["--priority", "high"]);
        ws.add_card(&todo, "Beta", &["--due", "2000-01-01"]);
        ws.add_card(&other, "Gamma", &["--status", "waiting"]);

        let search = ws.ok(&["card", "list", "--search", "alpha"]);
        assert_eq!(search["count"], 1);
        assert_eq!(search["items"][0]["title"], "Alpha Drop");

        assert_eq!(ws.ok(&["card", "list", "--column", &other])["count"], 1);
        assert_eq!(ws.ok(&["card", "list", "--status", "waiting"])["count"], 1);
        assert_eq!(ws.ok(&["card", "list", "--priority", "high"])["count"], 1);

        let overdue = ws.ok(&["card", "list", "--overdue"]);
        assert_eq!(overdue["count"], 1);
        assert_eq!(overdue["items"][0]["title"], "Beta");
    }
}

mod board_tests {
    use super::*;

    #[test]
    fn test_stats_counts_overdue_but_not_done() {
        let ws = Workspace::new();
        let todo = ws.add_column("Todo");
        ws.add_card(&todo, "finished", &["--due", "2000-01-01", "--status", "done"]);
        ws.add_card(&todo, "open", &["--due", "2000-01-01"]);

        let stats = ws.ok(&["stats"]);
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["overdue"], 1);
        assert_eq!(stats["done"], 1);
        assert_eq!(stats["completionPercent"], 50);
        assert_eq!(stats["columns"], 1);
    }

    #[test]
    fn test_export_then_import_into_fresh_board() {
        let source = Workspace::new();
        let todo = source.add_column("Todo");
        source.add_card(&todo, "LayerZero", &["--tags", "DeFi"]);
        source.add_card(&todo, "Eigen", &[]);

        let out_dir = tempdir().unwrap();
        let exported = source.ok(&["export", "--output", out_dir.path().to_str().unwrap()]);
        let path = PathBuf::from(exported["path"].as_str().unwrap());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("airdropboard-backup-"));
        let payload: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(payload.is_array(), "export is a bare array of columns");

        let target = Workspace::new();
        let imported = target.ok(&["import", "--file", path.to_str().unwrap()]);
        assert_eq!(imported["cards"], 2);
        assert_eq!(
            target.ok(&["card", "list"])["items"],
            source.ok(&["card", "list"])["items"]
        );
    }

    #[test]
    fn test_import_rejects_non_array() {
        let ws = Workspace::new();
        ws.add_column("Existing");
        let bad = ws.dir.path().join("bad.json");
        fs::write(&bad, r#"{"columns": []}"#).unwrap();

        ws.fail(&["import", "--file", bad.to_str().unwrap()]);

        let list = ws.ok(&["column", "list"]);
        assert_eq!(list["items"][0]["name"], "Existing");
    }

    #[test]
    fn test_board_file_is_versioned_envelope() {
        let ws = Workspace::new();
        ws.add_column("Todo");
        let raw = fs::read_to_string(ws.data_dir().join("airdrop-board.json")).unwrap();
        let document: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document["version"], 1);
        assert_eq!(document["columns"][0]["name"], "Todo");
    }

    #[test]
    fn test_ephemeral_session_writes_nothing() {
        let ws = Workspace::new();
        ws.ok(&["--ephemeral", "column", "add", "--name", "Scratch"]);
        assert!(!ws.data_dir().join("airdrop-board.json").exists());
        assert_eq!(ws.ok(&["column", "list"])["count"], 0);
    }
}

mod reminder_tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_due_reminder_fires_once() {
        let ws = Workspace::new();
        // Recent enough that the sent reminder is not pruned straight away
        let at = (Utc::now() - Duration::minutes(5)).to_rfc3339();
        let reminder = ws.ok(&[
            "reminder",
            "add",
            "--id",
            "snapshot",
            "--title",
            "Snapshot",
            "--message",
            "hold tokens",
            "--at",
            &at,
        ]);
        assert_eq!(reminder["id"], "snapshot");
        assert_eq!(reminder["sent"], false);

        let check = ws.ok(&["reminder", "check"]);
        assert_eq!(check["remindersFired"], 1);
        assert_eq!(check["notifications"][0]["title"], "Snapshot");

        let list = ws.ok(&["reminder", "list"]);
        assert_eq!(list["items"][0]["sent"], true);
        assert_eq!(ws.ok(&["reminder", "check"])["remindersFired"], 0);
    }

    #[test]
    fn test_future_reminder_stays_pending() {
        let ws = Workspace::new();
        ws.ok(&["reminder", "add", "--title", "Later", "--in-minutes", "600"]);
        assert_eq!(ws.ok(&["reminder", "check"])["remindersFired"], 0);
        assert_eq!(ws.ok(&["stats"])["reminders"]["pending"], 1);
    }

    #[test]
    fn test_cancel_and_clear() {
        let ws = Workspace::new();
        ws.ok(&["reminder", "add", "--id", "a", "--title", "A", "--in-minutes", "5"]);
        ws.ok(&["reminder", "add", "--id", "b", "--title", "B", "--in-minutes", "5"]);

        assert_eq!(ws.ok(&["reminder", "cancel", "--id", "a"])["cancelled"], "a");
        ws.fail(&["reminder", "cancel", "--id", "a"]);

        let error = ws.fail(&["reminder", "clear"]);
        assert!(error.contains("--yes"));
        assert_eq!(ws.ok(&["reminder", "clear", "--yes"])["cleared"], 1);
        assert_eq!(ws.ok(&["reminder", "list"])["count"], 0);
    }
}

mod preference_tests {
    use super::*;

    #[test]
    fn test_theme_toggle_persists() {
        let ws = Workspace::new();
        assert_eq!(ws.ok(&["theme", "get"])["theme"], "dark");
        assert_eq!(ws.ok(&["theme", "toggle"])["theme"], "light");
        assert_eq!(ws.ok(&["theme", "get"])["theme"], "light");
        assert_eq!(ws.ok(&["theme", "set", "dark"])["theme"], "dark");
    }

    #[test]
    fn test_language_changes_messages() {
        let ws = Workspace::new();
        assert_eq!(ws.ok(&["lang", "get"])["language"], "pt");

        ws.ok(&["lang", "set", "en"]);
        assert_eq!(ws.ok(&["lang", "get"])["language"], "en");

        let todo = ws.add_column("Todo");
        let id = ws.add_card(&todo, "Mode", &[]);
        let error = ws.fail(&["card", "remove", "--id", &id]);
        assert!(error.contains("Remove the card"));
    }

    #[test]
    fn test_unknown_language_is_a_usage_error() {
        let ws = Workspace::new();
        ws.airdrop()
            .args(["lang", "set", "klingon"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid language"));
    }
}

#[test]
fn test_completions_mention_binary() {
    Command::cargo_bin("airdrop")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("airdrop"));
}

#[test]
fn test_malformed_config_is_reported() {
    let ws = Workspace::with_config("[ui\nmax_columns = ");
    let error = ws.fail(&["column", "list"]);
    assert!(error.contains("config"));
}
