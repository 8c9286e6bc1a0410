//! GiftFest Engine - Game policy loop and session lifecycle

pub mod policy;
pub mod session;

pub use policy::PolicyEngine;
pub use session::{
    AlwaysHealthy, MemorySessionTracker, ProxyHealth, SessionRunner, SessionTracker,
};
