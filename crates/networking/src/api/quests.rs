//! Quest endpoints: list, collect, check

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use giftfest_core::{CollectResponse, Quest, QuestTag, Result};

use super::decode_or_default;
use crate::GiftFestClient;

impl GiftFestClient {
    /// Fetch the quest list for one tag
    pub async fn fetch_quests(&mut self, tag: QuestTag) -> Result<Vec<Quest>> {
        let path = match tag {
            // Main progress entries additionally hide already-ordered ones
            QuestTag::MainProgress => {
                format!("wrapquests?tag={}&no_ord_done=true", tag.as_str())
            }
            _ => format!("wrapquests?tag={}", tag.as_str()),
        };
        let response = self.request(Method::GET, &path, None, None).await?;
        Ok(decode_or_default(response, "quests"))
    }

    /// Collect the reward for a quest, keyed by its collect uuid
    ///
    /// The backend correlates the collect through the `x-request-id`
    /// header; a fresh v4 id is minted when the quest carries no uuid.
    pub async fn collect_quest_reward(
        &mut self,
        quest_uuid: Option<&str>,
    ) -> Result<CollectResponse> {
        let request_id = match quest_uuid {
            Some(uuid) => uuid.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let mut extra = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            extra.insert("x-request-id", value);
        }
        extra.insert("content-length", HeaderValue::from_static("0"));

        debug!(request_id = %request_id, "Collecting quest reward");

        let response = self
            .request(Method::POST, "wrapquests/collect", Some(&json!({})), Some(extra))
            .await?;
        Ok(decode_or_default(response, "collect"))
    }

    /// Trigger a server-side completion check for a partner quest
    pub async fn check_quest(&mut self, quest_id: i64) -> Result<bool> {
        let mut extra = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            extra.insert("x-request-id", value);
        }

        let response = self
            .request(
                Method::POST,
                &format!("quests/{}", quest_id),
                Some(&json!({})),
                Some(extra),
            )
            .await?;
        Ok(response
            .and_then(|v| v.get("result").and_then(|r| r.as_bool()))
            .unwrap_or(false))
    }
}
