//! Inventory, lootbox, and resource endpoints

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use giftfest_core::{
    ActivateAllResponse, ActivateResponse, InventoryItem, InventoryResponse, LootboxGroup,
    LootboxGroupsResponse, ResourcesResponse, Result,
};

use super::decode_or_default;
use crate::GiftFestClient;

impl GiftFestClient {
    /// Fetch inventory items filtered by reward category
    pub async fn fetch_inventory(
        &mut self,
        limit: u32,
        include: &str,
    ) -> Result<Vec<InventoryItem>> {
        let path = format!("inventory?limit={}&include={}&pagination=0", limit, include);
        let response = self.request(Method::GET, &path, None, None).await?;
        let decoded: InventoryResponse = decode_or_default(response, "inventory");
        Ok(decoded.inventory)
    }

    /// Fetch lootboxes grouped by kind (counts, not identities)
    pub async fn fetch_lootbox_groups(&mut self) -> Result<Vec<LootboxGroup>> {
        let response = self
            .request(Method::GET, "inventory/group?type=lootbox", None, None)
            .await?;
        let decoded: LootboxGroupsResponse = decode_or_default(response, "lootbox groups");
        Ok(decoded.items)
    }

    /// Open up to `limit` lootboxes of one group in a single batched call
    pub async fn activate_lootboxes(
        &mut self,
        reward_amount: i64,
        limit: u32,
    ) -> Result<ActivateAllResponse> {
        debug!(reward_amount, limit, "Activating lootboxes");
        let body = json!({
            "reward_amount": reward_amount,
            "reward_type": "lootbox",
            "limit": limit,
        });
        let response = self
            .request(Method::POST, "inventory/activate/all", Some(&body), None)
            .await?;
        Ok(decode_or_default(response, "activate all"))
    }

    /// Activate a single inventory item (e.g. the onboarding reward)
    pub async fn activate_item(&mut self, item_id: i64) -> Result<bool> {
        let body = json!({ "item_id": item_id });
        let response = self
            .request(Method::POST, "inventory/activate", Some(&body), None)
            .await?;
        let decoded: ActivateResponse = decode_or_default(response, "activate");
        Ok(decoded.result)
    }

    /// Fetch resource balances (energy etc.)
    pub async fn fetch_resources(&mut self) -> Result<ResourcesResponse> {
        let response = self
            .request(Method::GET, "inventory/resources", None, None)
            .await?;
        Ok(decode_or_default(response, "resources"))
    }
}
