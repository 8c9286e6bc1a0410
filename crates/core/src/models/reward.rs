//! Reward models produced by collect/activate calls

use serde::{Deserialize, Serialize};

/// Closed set of reward kinds the backend hands out
///
/// Decoded once from the wire `type` string; unrecognized values keep the
/// raw string so logs still show what the server actually sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RewardKind {
    Resource,
    Lootbox,
    LotteryChances,
    GameItem,
    Unknown(String),
}

impl From<String> for RewardKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "resource" => RewardKind::Resource,
            "lootbox" => RewardKind::Lootbox,
            "lottery_chances" => RewardKind::LotteryChances,
            "game2048_item" => RewardKind::GameItem,
            _ => RewardKind::Unknown(raw),
        }
    }
}

impl Default for RewardKind {
    fn default() -> Self {
        RewardKind::Unknown(String::new())
    }
}

impl RewardKind {
    /// Human-readable label; unknown kinds show the raw wire string
    pub fn label(&self) -> &str {
        match self {
            RewardKind::Resource => "resource",
            RewardKind::Lootbox => "lootbox",
            RewardKind::LotteryChances => "lottery_chances",
            RewardKind::GameItem => "game2048_item",
            RewardKind::Unknown(raw) if raw.is_empty() => "unknown",
            RewardKind::Unknown(raw) => raw,
        }
    }
}

/// One granted reward entry
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Reward {
    #[serde(default)]
    pub slug: String,
    #[serde(default, rename = "type")]
    pub kind: RewardKind,
    #[serde(default)]
    pub amount: i64,
    /// Amount after server-side multipliers; what the user actually received
    #[serde(default)]
    pub real_amount: i64,
    #[serde(default)]
    pub title: String,
}

/// Response from `POST /wrapquests/collect`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CollectResponse {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_decode() {
        let reward: Reward = serde_json::from_str(
            r#"{"slug":"stars","type":"lottery_chances","amount":3,"real_amount":3}"#,
        )
        .unwrap();
        assert_eq!(reward.kind, RewardKind::LotteryChances);
        assert_eq!(reward.real_amount, 3);
    }

    #[test]
    fn unknown_kind_preserves_raw_string() {
        let reward: Reward =
            serde_json::from_str(r#"{"type":"mystery_prize"}"#).unwrap();
        assert_eq!(reward.kind, RewardKind::Unknown("mystery_prize".into()));
    }

    #[test]
    fn collect_response_tolerates_missing_fields() {
        let resp: CollectResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.result);
        assert!(resp.rewards.is_empty());
    }
}
