//! Tag normalisation and deterministic tag colours.

use serde::Serialize;

pub const TAG_SATURATION: u8 = 70;
pub const TAG_LIGHTNESS: u8 = 40;

/// HSL colour derived from a tag's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TagColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl TagColor {
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = f64::from(self.hue);
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match self.hue {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

/// Hue comes from a 32-bit rolling hash (`h = c + (h << 5) - h`) over the UTF-16
/// code units of the tag, so the same text always gets the same colour.
pub fn tag_color(tag: &str) -> TagColor {
    let mut hash: i64 = 0;
    for unit in tag.encode_utf16() {
        let shifted = i64::from((hash as i32) << 5);
        hash = i64::from(unit) + (shifted - hash);
    }
    TagColor {
        hue: (hash % 360).unsigned_abs() as u16,
        saturation: TAG_SATURATION,
        lightness: TAG_LIGHTNESS,
    }
}

/// Trims, drops blanks and removes case-insensitive duplicates, keeping first spelling.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            continue;
        }
        if !out.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Splits a comma-separated tag field.
pub fn parse_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}
