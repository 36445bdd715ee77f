//! Storage keys shared by every frontend.

pub const BOARD_KEY: &str = "airdrop-board";
pub const REMINDERS_KEY: &str = "airdrop-reminders";
pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";
pub const NOTIFICATION_PERMISSION_KEY: &str = "notification-permission";

/// Key under which an unreadable value is set aside before it can be overwritten.
pub fn corrupt_backup_key(key: &str, at: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}.corrupt-{}", key, at.format("%Y%m%dT%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_corrupt_backup_key_embeds_timestamp() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 5).unwrap();
        assert_eq!(
            corrupt_backup_key(BOARD_KEY, at),
            "airdrop-board.corrupt-20240601T083005"
        );
    }
}
