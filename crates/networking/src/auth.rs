//! Seam for the external Telegram-client collaborator
//!
//! The webview handshake and session storage live outside this workspace;
//! all the transport needs is something that can produce a fresh
//! authentication payload on demand (initially and on re-login).

use async_trait::async_trait;
use giftfest_core::{ReferralData, Result};

/// Opaque authentication payload plus any referral data extracted from it
#[derive(Debug, Clone)]
pub struct AuthPayload {
    /// Raw `tgWebAppData` string, percent-decoded
    pub init_data: String,
    /// Referral data decoded from the start parameter, if present
    pub referral: Option<ReferralData>,
}

/// Produces authentication payloads for login and re-login
///
/// A provider failure means the session cannot be (re)authenticated and is
/// reported as `Error::SessionInvalid`.
#[async_trait]
pub trait AuthPayloadProvider: Send + Sync {
    async fn fetch_auth_payload(&self, ref_param: &str) -> Result<AuthPayload>;
}
