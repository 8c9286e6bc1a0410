//! Profile and standalone gift endpoints

use reqwest::Method;
use serde_json::json;

use giftfest_core::{Gift, GiftsResponse, Profile, Result};

use super::decode_or_default;
use crate::GiftFestClient;

impl GiftFestClient {
    /// Fetch the user's profile
    pub async fn fetch_profile(&mut self) -> Result<Option<Profile>> {
        let response = self.request(Method::GET, "profile", None, None).await?;
        Ok(response.map(|value| decode_or_default(Some(value), "profile")))
    }

    /// Fetch the standalone gift list
    pub async fn fetch_gifts(&mut self) -> Result<Vec<Gift>> {
        let response = self.request(Method::GET, "gifts", None, None).await?;
        let decoded: GiftsResponse = decode_or_default(response, "gifts");
        Ok(decoded.gifts)
    }

    /// Claim a standalone gift
    pub async fn claim_gift(&mut self, gift_id: &str) -> Result<bool> {
        let response = self
            .request(
                Method::POST,
                &format!("gifts/{}/claim", gift_id),
                Some(&json!({})),
                None,
            )
            .await?;
        Ok(response.is_some())
    }
}
