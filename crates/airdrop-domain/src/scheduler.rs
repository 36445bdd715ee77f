//! Periodic reminder and deadline checks.

use airdrop_core::BoardResult;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::board::Board;
use crate::card::CardId;
use crate::deadline::{deadline_alerts, DeadlineAlert, DeadlineKind};
use crate::i18n::{tf, Label};
use crate::preferences::Language;
use crate::reminder::{Reminder, ReminderSchedule, ReminderStats, ReminderStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationLevel {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NotificationSource {
    Reminder { id: String },
    Deadline { card_id: CardId, kind: DeadlineKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub level: NotificationLevel,
    pub source: NotificationSource,
}

impl Notification {
    fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            title: reminder.title.clone(),
            body: reminder.message.clone(),
            level: NotificationLevel::Warning,
            source: NotificationSource::Reminder {
                id: reminder.id.clone(),
            },
        }
    }

    fn from_deadline(alert: &DeadlineAlert, language: Language) -> Self {
        let (label, level) = match alert.kind {
            DeadlineKind::DueTomorrow => (Label::DueTomorrow, NotificationLevel::Warning),
            DeadlineKind::DueInAWeek => (Label::DueInAWeek, NotificationLevel::Info),
            DeadlineKind::Overdue => (Label::OverdueAlert, NotificationLevel::Danger),
        };
        Self {
            title: tf(language, label, &[("title", alert.title.as_str())]),
            body: alert.due_date.format("%Y-%m-%d").to_string(),
            level,
            source: NotificationSource::Deadline {
                card_id: alert.card_id,
                kind: alert.kind,
            },
        }
    }

    /// One-line form used by toasts.
    pub fn summary(&self) -> String {
        match &self.source {
            NotificationSource::Reminder { .. } if !self.body.is_empty() => {
                format!("{}: {}", self.title, self.body)
            }
            _ => self.title.clone(),
        }
    }
}

/// Presentation side of a notification (toast, bell, stdout).
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub reminders_fired: usize,
    pub reminders_pruned: usize,
    pub deadline_alerts: usize,
}

pub struct NotificationScheduler {
    schedule: ReminderSchedule,
    storage: Box<dyn ReminderStorage>,
    language: Language,
    prune_after: Duration,
    announced: HashSet<(CardId, DeadlineKind, NaiveDate)>,
}

impl NotificationScheduler {
    pub fn new(storage: Box<dyn ReminderStorage>, language: Language, prune_after_days: i64) -> Self {
        let schedule = ReminderSchedule::new(storage.load());
        tracing::debug!(reminders = schedule.len(), "reminders loaded");
        Self {
            schedule,
            storage,
            language,
            prune_after: Duration::days(prune_after_days),
            announced: HashSet::new(),
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.schedule.reminders()
    }

    pub fn stats(&self, now: DateTime<Utc>) -> ReminderStats {
        self.schedule.stats(now)
    }

    pub fn schedule(&mut self, reminder: Reminder) -> BoardResult<Reminder> {
        let mut next = self.schedule.clone();
        next.upsert(reminder.clone());
        self.persist(next)?;
        Ok(reminder)
    }

    pub fn cancel(&mut self, id: &str) -> BoardResult<Option<Reminder>> {
        let mut next = self.schedule.clone();
        let removed = next.remove(id);
        if removed.is_some() {
            self.persist(next)?;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> BoardResult<usize> {
        let count = self.schedule.len();
        self.persist(ReminderSchedule::default())?;
        Ok(count)
    }

    /// Fires due reminders, prunes old sent ones, saves, then announces deadline
    /// alerts that have not been announced earlier in this session.
    ///
    /// A failed reminder save keeps the reminders pending and is returned after
    /// the deadline pass, which does not depend on reminder storage.
    pub fn check(
        &mut self,
        board: &Board,
        now: DateTime<Utc>,
        today: NaiveDate,
        notifier: &mut dyn Notifier,
    ) -> BoardResult<CheckReport> {
        let mut next = self.schedule.clone();
        let mut fired = next.take_due(now);
        let mut pruned = next.prune(now, self.prune_after);
        let saved = if !fired.is_empty() || pruned > 0 {
            self.persist(next)
        } else {
            Ok(())
        };
        if let Err(e) = &saved {
            tracing::warn!(error = %e, "saving reminders failed, due reminders stay pending");
            fired.clear();
            pruned = 0;
        }
        for reminder in &fired {
            notifier.notify(&Notification::from_reminder(reminder));
        }

        let mut alerts = 0;
        for alert in deadline_alerts(board, today) {
            if self.announced.insert((alert.card_id, alert.kind, alert.due_date)) {
                notifier.notify(&Notification::from_deadline(&alert, self.language));
                alerts += 1;
            }
        }

        let report = CheckReport {
            reminders_fired: fired.len(),
            reminders_pruned: pruned,
            deadline_alerts: alerts,
        };
        if report != CheckReport::default() {
            tracing::debug!(?report, "notification check");
        }
        saved?;
        Ok(report)
    }

    fn persist(&mut self, next: ReminderSchedule) -> BoardResult<()> {
        self.storage.save(next.reminders())?;
        self.schedule = next;
        Ok(())
    }
}
