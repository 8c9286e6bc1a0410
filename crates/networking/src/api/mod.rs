//! Remote API facade: one method per backend endpoint
//!
//! Pure request/response mapping. Every operation degrades to an
//! empty/default container on a soft failure so the policy engine can run
//! degraded; `Err` is reserved for the session-invalid condition.

mod analytics;
mod board;
mod inventory;
mod profile;
mod quests;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decode a facade response, falling back to the type's default
///
/// Missing responses (soft failures) and undecodable payloads both land on
/// the default so callers see "nothing to do" instead of an error.
pub(crate) fn decode_or_default<T>(value: Option<Value>, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Undecodable {} response: {}", what, e);
            T::default()
        }),
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftfest_core::{Quest, QuestState};
    use serde_json::json;

    #[test]
    fn soft_failure_decodes_to_default() {
        let quests: Vec<Quest> = decode_or_default(None, "quests");
        assert!(quests.is_empty());
    }

    #[test]
    fn wrong_shape_decodes_to_default() {
        let quests: Vec<Quest> = decode_or_default(Some(json!({"error": "oops"})), "quests");
        assert!(quests.is_empty());
    }

    #[test]
    fn valid_payload_decodes() {
        let quests: Vec<Quest> = decode_or_default(
            Some(json!([{"uuid": "q-1", "state": "ready", "title": "Open the calendar"}])),
            "quests",
        );
        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].state, QuestState::Ready);
    }
}
