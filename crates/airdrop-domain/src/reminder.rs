use airdrop_core::BoardResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub fire_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sent: bool,
}

impl Reminder {
    pub fn new(
        id: Option<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        fire_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: title.into(),
            message: message.into(),
            fire_at,
            created_at: now,
            sent: false,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.fire_at <= now
    }
}

/// Where reminders are kept between sessions, separately from the board.
pub trait ReminderStorage {
    /// Missing or unreadable data yields an empty list.
    fn load(&self) -> Vec<Reminder>;
    fn save(&self, reminders: &[Reminder]) -> BoardResult<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStats {
    pub total: usize,
    /// Unsent and not yet due.
    pub pending: usize,
    pub sent: usize,
    /// Unsent but already due.
    pub overdue: usize,
}

/// In-memory reminder collection with the firing and pruning rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderSchedule {
    reminders: Vec<Reminder>,
}

impl ReminderSchedule {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Adds the reminder, replacing any existing one with the same id.
    pub fn upsert(&mut self, reminder: Reminder) {
        match self.reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(existing) => *existing = reminder,
            None => self.reminders.push(reminder),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Reminder> {
        let index = self.reminders.iter().position(|r| r.id == id)?;
        Some(self.reminders.remove(index))
    }

    pub fn clear(&mut self) {
        self.reminders.clear();
    }

    /// Marks every due reminder as sent and returns copies of them.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut fired = Vec::new();
        for reminder in self.reminders.iter_mut().filter(|r| r.is_due(now)) {
            reminder.sent = true;
            fired.push(reminder.clone());
        }
        fired
    }

    /// Drops sent reminders whose firing time is at least `max_age` in the past.
    pub fn prune(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let cutoff = now - max_age;
        let before = self.reminders.len();
        self.reminders.retain(|r| !r.sent || r.fire_at > cutoff);
        before - self.reminders.len()
    }

    pub fn stats(&self, now: DateTime<Utc>) -> ReminderStats {
        let mut stats = ReminderStats {
            total: self.reminders.len(),
            ..Default::default()
        };
        for reminder in &self.reminders {
            if reminder.sent {
                stats.sent += 1;
            } else if reminder.fire_at > now {
                stats.pending += 1;
            } else {
                stats.overdue += 1;
            }
        }
        stats
    }
}
