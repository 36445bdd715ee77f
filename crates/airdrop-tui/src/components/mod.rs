pub mod banner;
pub mod popup;

pub use banner::Banner;
pub use popup::{centered_rect, render_input_popup, render_popup_with_block};
