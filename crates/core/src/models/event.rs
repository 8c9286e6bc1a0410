//! Analytics client-event payloads for /analytics/clientEvent

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

const INITIATOR: &str = "ma_prod";
const BROWSER: &str = "edge";
const BROWSER_VERSION: &str = "142.0.0.0";
const OS: &str = "windows";

/// Session block of an analytics event
#[derive(Debug, Clone, Serialize)]
pub struct EventSession {
    pub auth_date: i64,
    pub language: String,
}

/// Device block of an analytics event
#[derive(Debug, Clone, Serialize)]
pub struct EventDevice {
    pub user_agent: String,
    pub browser: String,
    pub browser_version: String,
    pub os: String,
}

/// Fire-and-forget analytics event mirroring what the webapp sends
#[derive(Debug, Clone, Serialize)]
pub struct ClientEvent {
    pub event_name: String,
    /// JSON-encoded string, not a nested object — that is what the wire wants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_data: Option<String>,
    pub page: String,
    pub client_timestamp: i64,
    pub initiator: String,
    pub session: EventSession,
    pub device: EventDevice,
}

impl ClientEvent {
    /// Bare event with no data payload
    pub fn new(event_name: &str, page: &str, user_agent: &str) -> Self {
        let now = Utc::now().timestamp();
        Self {
            event_name: event_name.to_string(),
            event_data: None,
            page: page.to_string(),
            client_timestamp: now,
            initiator: INITIATOR.to_string(),
            session: EventSession {
                auth_date: now,
                language: "ru".to_string(),
            },
            device: EventDevice {
                user_agent: user_agent.to_string(),
                browser: BROWSER.to_string(),
                browser_version: BROWSER_VERSION.to_string(),
                os: OS.to_string(),
            },
        }
    }

    /// Event fired after opening an advent-calendar card
    pub fn advent_opened(quest_id: i64, reward_amount: i64, user_agent: &str) -> Self {
        let mut event = Self::new("advent_cancel_share_tap", "/advent", user_agent);
        event.event_data = Some(
            json!({
                "reward_resource_amount": reward_amount,
                "quest_id": quest_id,
            })
            .to_string(),
        );
        event
    }

    /// Event fired before collecting a main-progress reward
    pub fn progress_collect(quest_id: i64, quest_type: &str, user_agent: &str) -> Self {
        let mut event = Self::new("quest_collect_reward_tap", "/giveaway", user_agent);
        event.event_data = Some(
            json!({
                "quest_id": quest_id,
                "quest_type": quest_type,
            })
            .to_string(),
        );
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advent_event_encodes_data_as_json_string() {
        let event = ClientEvent::advent_opened(17, 250, "UA");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_name"], "advent_cancel_share_tap");
        assert_eq!(value["page"], "/advent");
        // event_data is a string field holding JSON, not a nested object
        let data: serde_json::Value =
            serde_json::from_str(value["event_data"].as_str().unwrap()).unwrap();
        assert_eq!(data["quest_id"], 17);
        assert_eq!(data["reward_resource_amount"], 250);
    }

    #[test]
    fn bare_event_omits_event_data() {
        let event = ClientEvent::new("page_view", "/quests", "UA");
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("event_data").is_none());
    }
}
