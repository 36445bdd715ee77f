use airdrop_domain::{Toast, ToastLevel};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

use crate::theme::Palette;

/// A toast on screen, dismissed once its TTL has elapsed.
#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
}

impl Banner {
    pub fn new(toast: Toast) -> Self {
        Self {
            message: toast.message,
            level: toast.level,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let color = palette.toast(self.level);

        // +4 for border chars and padding
        let box_width = (self.message.chars().count() + 4).min(area.width as usize) as u16;
        let centered_x = area.width.saturating_sub(box_width) / 2;

        let banner_area = Rect {
            x: area.x + centered_x,
            y: area.y,
            width: box_width,
            height: 3.min(area.height),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(palette.popup());

        let widget = Paragraph::new(self.message.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(ratatui::widgets::Clear, banner_area);
        frame.render_widget(widget, banner_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_expiry() {
        let banner = Banner::new(Toast::success("saved"));
        assert!(!banner.is_expired(Duration::from_secs(60)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(banner.is_expired(Duration::from_millis(1)));
    }
}
