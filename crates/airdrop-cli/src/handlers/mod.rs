pub mod board;
pub mod card;
pub mod column;
pub mod export;
pub mod preferences;
pub mod reminder;
