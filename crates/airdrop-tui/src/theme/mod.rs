mod palette;

pub use palette::{column_color, tag_style, variant_color, Palette};
