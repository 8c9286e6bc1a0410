//! HTTP transport bound to one session and one optional proxy

mod client;
pub mod headers;
mod retry;

pub use client::{GiftFestClient, StatusClass};
