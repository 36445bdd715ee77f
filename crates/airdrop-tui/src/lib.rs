pub mod app;
pub mod clipboard;
pub mod components;
pub mod events;
pub mod form;
pub mod notifier;
pub mod selection;
pub mod theme;
pub mod ui;

pub use app::{App, AppMode};
