//! Analytics client events, fire-and-forget

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use giftfest_core::{ClientEvent, Result};

use crate::GiftFestClient;

impl GiftFestClient {
    /// Send one analytics event mirroring the webapp's own telemetry
    ///
    /// Soft failures are logged and swallowed; analytics never blocks the
    /// cycle. The session-invalid condition still propagates.
    pub async fn send_client_event(&mut self, event: &ClientEvent) -> Result<()> {
        let mut extra = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            extra.insert("x-request-id", value);
        }

        let body = serde_json::to_value(event).unwrap_or_default();
        let response = self
            .request(Method::POST, "analytics/clientEvent", Some(&body), Some(extra))
            .await?;

        if response.is_none() {
            debug!(event = %event.event_name, "Analytics event dropped");
        }
        Ok(())
    }
}
