//! GiftFest Core - Shared data models, configuration, and errors

pub mod config;
pub mod errors;
pub mod models;

pub use config::{BotSettings, Pacing, SessionConfig};
pub use errors::{Error, Result};
pub use models::*;
