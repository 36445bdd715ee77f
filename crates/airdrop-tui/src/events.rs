use airdrop_persistence::ChangeEvent;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    /// Time to run the reminder and deadline check.
    ReminderCheck,
    /// The board file was written by someone else.
    StorageChanged,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    shutdown_tx: mpsc::UnboundedSender<()>,
}

impl EventHandler {
    /// The first reminder check fires immediately.
    pub fn new(
        tick: Duration,
        reminder_interval: Duration,
        changes: Option<broadcast::Receiver<ChangeEvent>>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reminders = tokio::time::interval(reminder_interval);
            let mut changes = changes;
            loop {
                let event = tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = reminders.tick() => Event::ReminderCheck,
                    changed = next_change(&mut changes) => {
                        if !changed {
                            continue;
                        }
                        Event::StorageChanged
                    }
                    _ = tokio::time::sleep(tick) => {
                        match event::poll(Duration::from_millis(0)) {
                            Ok(true) => match event::read() {
                                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                    Event::Key(key)
                                }
                                _ => continue,
                            },
                            _ => Event::Tick,
                        }
                    }
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, shutdown_tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Resolves when a change arrives; pends forever without a watcher.
async fn next_change(changes: &mut Option<broadcast::Receiver<ChangeEvent>>) -> bool {
    let Some(rx) = changes.as_mut() else {
        return std::future::pending().await;
    };
    match rx.recv().await {
        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => true,
        Err(broadcast::error::RecvError::Closed) => {
            tracing::debug!("File watcher channel closed");
            *changes = None;
            false
        }
    }
}
