pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;

pub use config::{AppConfig, AutoScrollConfig};
pub use error::BoardError;
pub use logging::{LogEntry, LogLevel, Loggable};
pub use result::BoardResult;
pub use traits::Optimistic;
