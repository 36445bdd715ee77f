//! Card filtering functionality.
//!
//! Provides the `CardFilter` trait, its implementations, and the `FilterSet`
//! that holds what the user is currently filtering by.

pub mod card_filter;
pub mod filter_set;

pub use card_filter::{CardFilter, CompositeFilter, PriorityFilter, StatusFilter, TextSearch};
pub use filter_set::FilterSet;
