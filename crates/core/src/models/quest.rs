//! Quest models for the /wrapquests endpoints

use serde::{Deserialize, Serialize};

/// Server-side quest lifecycle state
///
/// Anything the backend adds later decodes as `Other` and is simply
/// skipped by the policy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestState {
    Ready,
    Completed,
    #[serde(other)]
    #[default]
    Other,
}

/// Quest list tags understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTag {
    Advent,
    Daily,
    Partner,
    Epic,
    MainProgress,
}

impl QuestTag {
    /// Wire value for the `tag` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestTag::Advent => "gift_advent",
            QuestTag::Daily => "gift_quests_daily",
            QuestTag::Partner => "gift_quests_partner",
            QuestTag::Epic => "gift_quests_epic",
            QuestTag::MainProgress => "gift_main_progress",
        }
    }
}

/// One quest as reported by `GET /wrapquests?tag=...`
///
/// Read-only snapshot; state transitions happen server-side and are
/// observed by re-fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Collect identifier (goes into the `x-request-id` header)
    #[serde(default)]
    pub uuid: Option<String>,
    /// Numeric quest id (used for analytics events)
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub quest_type: String,
    #[serde(default)]
    pub state: QuestState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_state_decodes_as_other() {
        let quest: Quest = serde_json::from_str(
            r#"{"uuid":"abc","title":"Daily check-in","state":"in_review"}"#,
        )
        .unwrap();
        assert_eq!(quest.state, QuestState::Other);
        assert_eq!(quest.id, None);
    }

    #[test]
    fn ready_and_completed_states_decode() {
        let ready: Quest =
            serde_json::from_str(r#"{"uuid":"a","state":"ready"}"#).unwrap();
        let done: Quest =
            serde_json::from_str(r#"{"uuid":"b","state":"completed"}"#).unwrap();
        assert_eq!(ready.state, QuestState::Ready);
        assert_eq!(done.state, QuestState::Completed);
    }

    #[test]
    fn missing_state_defaults_to_other() {
        let quest: Quest = serde_json::from_str(r#"{"uuid":"a"}"#).unwrap();
        assert_eq!(quest.state, QuestState::Other);
    }
}
