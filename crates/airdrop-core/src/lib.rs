pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod result;
pub mod traits;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::BoardError;
pub use input::InputState;
pub use result::BoardResult;
pub use traits::KeyValueStore;
