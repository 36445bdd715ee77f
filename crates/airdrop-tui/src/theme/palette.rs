use airdrop_domain::column::parse_hex_color;
use airdrop_domain::view::EventTone;
use airdrop_domain::{tag_color, CardVariant, Theme, ToastLevel};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub background: Color,
    pub popup_bg: Color,
    pub focused_border: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub highlight: Color,
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                background: Color::Reset,
                popup_bg: Color::Black,
                focused_border: Color::Cyan,
                border: Color::Gray,
                selected_bg: Color::Blue,
                highlight: Color::Yellow,
                success: Color::Green,
                info: Color::Cyan,
                warning: Color::Yellow,
                danger: Color::Red,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                background: Color::White,
                popup_bg: Color::Rgb(245, 245, 245),
                focused_border: Color::Blue,
                border: Color::DarkGray,
                selected_bg: Color::Rgb(191, 219, 254),
                highlight: Color::Rgb(180, 83, 9),
                success: Color::Rgb(22, 163, 74),
                info: Color::Rgb(37, 99, 235),
                warning: Color::Rgb(217, 119, 6),
                danger: Color::Rgb(220, 38, 38),
            },
        }
    }

    pub fn normal(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn popup(&self) -> Style {
        Style::default().fg(self.text).bg(self.popup_bg)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn selected(&self, focused: bool) -> Style {
        if focused {
            Style::default().bg(self.selected_bg)
        } else {
            Style::default()
        }
    }

    pub fn bold_highlight(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn toast(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Success => self.success,
            ToastLevel::Info => self.info,
            ToastLevel::Warning => self.warning,
            ToastLevel::Danger => self.danger,
        }
    }

    pub fn event_tone(&self, tone: EventTone) -> Color {
        match tone {
            EventTone::Done => self.success,
            EventTone::Overdue => self.danger,
            EventTone::Upcoming => self.info,
        }
    }
}

pub fn variant_color(variant: CardVariant) -> Color {
    match variant {
        CardVariant::Red => Color::Rgb(220, 38, 38),
        CardVariant::Orange => Color::Rgb(234, 88, 12),
        CardVariant::Green => Color::Rgb(22, 163, 74),
        CardVariant::Blue => Color::Rgb(37, 99, 235),
    }
}

/// Column header colour; unparseable values fall back to the default blue.
pub fn column_color(hex: &str) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Rgb(37, 99, 235))
}

pub fn tag_style(tag: &str) -> Style {
    let (r, g, b) = tag_color(tag).to_rgb();
    Style::default().fg(Color::White).bg(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_color_parses_hex() {
        assert_eq!(column_color("#16a34a"), Color::Rgb(0x16, 0xa3, 0x4a));
        assert_eq!(column_color("nope"), Color::Rgb(37, 99, 235));
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(Palette::for_theme(Theme::Dark), Palette::for_theme(Theme::Light));
    }
}
