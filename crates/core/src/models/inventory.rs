//! Inventory models for the /inventory endpoints

use serde::{Deserialize, Serialize};

use super::Reward;

/// Reward slug marking the onboarding item handed out on first login
pub const ONBOARDING_SLUG: &str = "main_onboarding";

/// Inventory filter for loose game items
pub const INCLUDE_GAME_ITEMS: &str = "game2048_item";

/// Inventory filter for technical items (onboarding etc.)
pub const INCLUDE_TECHNICAL: &str = "technical";

/// Reward reference inside an inventory item
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryReward {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
}

/// An item sitting in the user's inventory (not yet on the board)
///
/// Consumed when placed on the board or activated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub reward: InventoryReward,
}

/// Response from `GET /inventory`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InventoryResponse {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
}

/// Aggregated lootbox group from `GET /inventory/group?type=lootbox`
///
/// Groups carry counts, not individual lootbox identities.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LootboxGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub reward_amount: i64,
    #[serde(default)]
    pub count: u32,
}

/// Response from `GET /inventory/group`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LootboxGroupsResponse {
    #[serde(default)]
    pub items: Vec<LootboxGroup>,
}

/// Response from `POST /inventory/activate/all`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActivateAllResponse {
    #[serde(default)]
    pub activated: u32,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

/// Response from `POST /inventory/activate`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActivateResponse {
    #[serde(default)]
    pub result: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_item_decodes_with_nested_reward() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"id":42,"reward":{"slug":"gift_tier_1","title":"Teddy Bear"}}"#,
        )
        .unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.reward.slug, "gift_tier_1");
    }

    #[test]
    fn lootbox_groups_tolerate_partial_entries() {
        let resp: LootboxGroupsResponse =
            serde_json::from_str(r#"{"items":[{"title":"Bronze Box","count":3}]}"#).unwrap();
        assert_eq!(resp.items[0].count, 3);
        assert_eq!(resp.items[0].reward_amount, 0);
    }
}
