//! GiftFest Networking - HTTP transport, authentication, and API facade

pub mod api;
pub mod auth;
pub mod http;

pub use auth::{AuthPayload, AuthPayloadProvider};
pub use http::GiftFestClient;
