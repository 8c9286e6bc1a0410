//! Data models for GiftFest entities
//!
//! All response types decode defensively: optional fields default instead of
//! erroring, so a missing field degrades to "nothing there" at the facade
//! boundary rather than failing the call.

mod auth;
mod board;
mod event;
mod inventory;
mod profile;
mod quest;
mod resource;
mod reward;

pub use auth::*;
pub use board::*;
pub use event::*;
pub use inventory::*;
pub use profile::*;
pub use quest::*;
pub use resource::*;
pub use reward::*;
