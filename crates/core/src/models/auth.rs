//! Authentication models for the /auth/new endpoint

use serde::{Deserialize, Serialize};

/// Response from `POST /auth/new`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests (absent on failure)
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// The account's own referral code, if the server reports one
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// Current authenticated session state
///
/// Created on successful login and replaced wholesale on re-login;
/// never partially mutated.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// The raw webapp payload the session was minted from
    pub raw_init_data: String,
}

/// Referral data extracted from the webview start parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferralData {
    pub referral_code: String,
    pub referral_source: String,
}
