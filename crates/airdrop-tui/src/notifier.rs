use airdrop_domain::{Notification, NotificationLevel, NotificationPermission, Notifier, Toast, ToastLevel};
use std::io::{self, Write};

/// Collects notifications from one scheduler check as toasts, counting how
/// many should also ring the bell.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    audible: bool,
    pub toasts: Vec<Toast>,
    pub bells: usize,
}

impl TerminalNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            audible: permission == NotificationPermission::Granted,
            ..Self::default()
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: &Notification) {
        let level = match notification.level {
            NotificationLevel::Info => ToastLevel::Info,
            NotificationLevel::Warning => ToastLevel::Warning,
            NotificationLevel::Danger => ToastLevel::Danger,
        };
        self.toasts.push(Toast::new(notification.summary(), level));
        if self.audible {
            self.bells += 1;
        }
    }
}

pub fn ring_bell() {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        tracing::debug!("Could not ring terminal bell: {}", e);
    }
}
