//! Profile and standalone gift models

use serde::{Deserialize, Serialize};

/// User profile from `GET /profile`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// A standalone claimable gift from `GET /gifts`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Gift {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub claimed: bool,
}

/// Response from `GET /gifts`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GiftsResponse {
    #[serde(default)]
    pub gifts: Vec<Gift>,
}
