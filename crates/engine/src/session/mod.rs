//! Session lifecycle: bootstrap, onboarding, and the supervising loop

use async_trait::async_trait;
use rand::Rng;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{error, info, warn};

use giftfest_core::{
    BotSettings, Error, Result, SessionConfig, INCLUDE_TECHNICAL, ONBOARDING_SLUG,
};
use giftfest_networking::{AuthPayloadProvider, GiftFestClient};

use crate::policy::PolicyEngine;

/// Fallback referral parameter baked into the webapp (base64 start param)
const DEFAULT_REF_PARAM: &str = "UkM9MDAwMDAwSDVHY0UmUlM9aW52aXRlX2ZyaWVuZA%3D%3D";

/// Tracks which session names have been seen before (the external store
/// decides how this is persisted)
#[async_trait]
pub trait SessionTracker: Send + Sync {
    async fn is_first_run(&self, session_name: &str) -> Result<bool>;
    async fn record_session(&self, session_name: &str) -> Result<()>;
}

/// In-memory tracker for tests and single-process embedding
#[derive(Default)]
pub struct MemorySessionTracker {
    seen: Mutex<HashSet<String>>,
}

#[async_trait]
impl SessionTracker for MemorySessionTracker {
    async fn is_first_run(&self, session_name: &str) -> Result<bool> {
        Ok(!self.seen.lock().await.contains(session_name))
    }

    async fn record_session(&self, session_name: &str) -> Result<()> {
        self.seen.lock().await.insert(session_name.to_string());
        Ok(())
    }
}

/// External proxy-health collaborator
///
/// `Ok(Some(url))` switches to a replacement proxy, `Ok(None)` keeps the
/// current one; `Err` means no working proxy could be found.
#[async_trait]
pub trait ProxyHealth: Send + Sync {
    async fn ensure_working(&self, current: Option<&str>) -> Result<Option<String>>;
}

/// No-op health check for proxyless runs
pub struct AlwaysHealthy;

#[async_trait]
impl ProxyHealth for AlwaysHealthy {
    async fn ensure_working(&self, _current: Option<&str>) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Deterministic referral parameter selection
///
/// Byte-sum of the session name mod 10: remainders below 6 route to the
/// configured code when one exists, the rest keep the built-in default.
/// Content routing, not a security mechanism.
pub fn referral_param(session_name: &str, configured: Option<&str>) -> String {
    let remainder = session_name.bytes().map(u64::from).sum::<u64>() % 10;
    let raw = match configured {
        Some(code) if remainder < 6 => code,
        _ => DEFAULT_REF_PARAM,
    };
    decode_ref_param(raw)
}

/// Percent-decode a referral code and strip base64 padding
///
/// A code that fails to decode (not UTF-8 after unescaping) is used as-is;
/// the backend tolerates either form.
fn decode_ref_param(raw: &str) -> String {
    let mut decoded = urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string());
    if decoded.ends_with("==") {
        while decoded.ends_with('=') {
            decoded.pop();
        }
    }
    decoded
}

/// Drives one account: bootstrap, login, onboarding, and the cycle loop
pub struct SessionRunner {
    config: SessionConfig,
    settings: BotSettings,
    provider: Arc<dyn AuthPayloadProvider>,
    tracker: Arc<dyn SessionTracker>,
    proxy_health: Arc<dyn ProxyHealth>,
}

impl SessionRunner {
    pub fn new(
        config: SessionConfig,
        settings: &BotSettings,
        provider: Arc<dyn AuthPayloadProvider>,
        tracker: Arc<dyn SessionTracker>,
        proxy_health: Arc<dyn ProxyHealth>,
    ) -> Self {
        Self {
            config,
            settings: settings.clone(),
            provider,
            tracker,
            proxy_health,
        }
    }

    /// Run this account until the session becomes invalid
    ///
    /// Anything short of a session-invalid condition is contained: the
    /// bootstrap is retried with a randomized 60-120s backoff, and a failed
    /// cycle costs one 60s pause.
    pub async fn run(&self) -> Result<()> {
        loop {
            match self.run_session().await {
                Err(err) if err.is_fatal() => {
                    error!(session = %self.config.session_name, "Session invalid: {}", err);
                    return Err(err);
                }
                Err(err) => {
                    let backoff = {
                        let (lo, hi) = self.settings.pacing.outer_backoff;
                        rand::thread_rng().gen_range(lo..=hi)
                    };
                    error!(
                        session = %self.config.session_name,
                        "Unexpected error: {}. Backing off for {}s",
                        err,
                        backoff as u64
                    );
                    sleep(Duration::from_secs_f64(backoff)).await;
                }
                // run_session only returns through an error
                Ok(()) => unreachable!("session loop ended without an error"),
            }
        }
    }

    async fn run_session(&self) -> Result<()> {
        let session_name = &self.config.session_name;

        let first_run = self
            .tracker
            .is_first_run(session_name)
            .await
            .map_err(|e| Error::SessionInvalid(format!("session state unavailable: {}", e)))?;
        if first_run {
            info!(session = %session_name, "Detected first session run");
            self.tracker.record_session(session_name).await.ok();
        }

        let start_delay = {
            let mut rng = rand::thread_rng();
            rng.gen_range(1.0..=self.settings.session_start_delay_secs.max(1.0))
        };
        info!(session = %session_name, "Bot will start in {}s", start_delay as u64);
        sleep(Duration::from_secs_f64(start_delay)).await;

        let mut proxy = self.config.proxy.clone();
        if self.settings.use_proxy {
            match self.proxy_health.ensure_working(proxy.as_deref()).await {
                Ok(Some(replacement)) => {
                    info!(session = %session_name, proxy = %replacement, "Switched to new proxy");
                    proxy = Some(replacement);
                }
                Ok(None) => {}
                Err(_) => {
                    return Err(Error::SessionInvalid("no working proxy".to_string()));
                }
            }
        }

        let ref_param = referral_param(session_name, self.settings.ref_code.as_deref());
        let mut client = GiftFestClient::new(
            &self.config,
            &self.settings,
            proxy.as_deref(),
            ref_param.clone(),
            self.provider.clone(),
        )?;

        let payload = self.provider.fetch_auth_payload(&ref_param).await?;
        let referral = if first_run {
            payload.referral.as_ref()
        } else {
            None
        };
        if !client.login(&payload.init_data, referral).await {
            return Err(Error::SessionInvalid("login failed".to_string()));
        }

        if first_run {
            self.activate_onboarding(&mut client).await?;
        }

        let engine = PolicyEngine::new(session_name, &self.settings);
        loop {
            if let Err(err) = engine.run_cycle(&mut client).await {
                if err.is_fatal() {
                    return Err(err);
                }
                // Cycle-level fault isolation: one failure never ends the run
                warn!(session = %session_name, "Cycle failed: {}", err);
                sleep(Duration::from_secs(self.settings.pacing.cycle_failure_secs)).await;
            }
        }
    }

    /// Best-effort onboarding activation on first run; a miss is logged
    /// but never fatal
    async fn activate_onboarding(&self, client: &mut GiftFestClient) -> Result<()> {
        let session_name = &self.config.session_name;
        info!(session = %session_name, "First run, activating onboarding");

        let inventory = client.fetch_inventory(50, INCLUDE_TECHNICAL).await?;
        let onboarding = inventory
            .into_iter()
            .find(|item| item.reward.slug == ONBOARDING_SLUG);

        match onboarding {
            Some(item) => {
                let delay = {
                    let (lo, hi) = self.settings.pacing.quest_collect;
                    rand::thread_rng().gen_range(lo..=hi)
                };
                sleep(Duration::from_secs_f64(delay)).await;
                if client.activate_item(item.id).await? {
                    info!(session = %session_name, "Onboarding activated");
                } else {
                    warn!(session = %session_name, "Onboarding activation failed");
                }
            }
            None => warn!(session = %session_name, "No onboarding item in inventory"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referral_bucket_is_deterministic() {
        let first = referral_param("alice_session", Some("Q0ZHUkVG"));
        let second = referral_param("alice_session", Some("Q0ZHUkVG"));
        assert_eq!(first, second);
    }

    #[test]
    fn low_remainder_routes_to_the_configured_code() {
        // "b" has byte sum 98, remainder 8 -> default; "d" sums to 100,
        // remainder 0 -> configured code.
        assert_eq!(referral_param("d", Some("MYCODE")), "MYCODE");
        assert!(referral_param("b", Some("MYCODE")).starts_with("UkM9"));
    }

    #[test]
    fn missing_config_always_uses_the_default() {
        let param = referral_param("d", None);
        assert!(param.starts_with("UkM9"));
    }

    #[test]
    fn default_param_is_decoded_and_unpadded() {
        let param = referral_param("b", None);
        // %3D%3D decodes to == and the padding is stripped
        assert!(!param.contains('%'));
        assert!(!param.ends_with('='));
    }

    #[test]
    fn ref_param_decoding_tolerates_invalid_escapes() {
        assert_eq!(decode_ref_param("a%ZZb"), "a%ZZb");
        assert_eq!(decode_ref_param("a%3Db"), "a=b");
        assert_eq!(decode_ref_param("100%"), "100%");
    }

    #[test]
    fn padding_is_stripped_only_when_doubled() {
        assert_eq!(decode_ref_param("Q0ZH%3D%3D"), "Q0ZH");
        // A single trailing = is not base64 padding here
        assert_eq!(decode_ref_param("a%3D"), "a=");
    }

    #[tokio::test]
    async fn memory_tracker_flips_after_recording() {
        let tracker = MemorySessionTracker::default();
        assert!(tracker.is_first_run("s1").await.unwrap());
        tracker.record_session("s1").await.unwrap();
        assert!(!tracker.is_first_run("s1").await.unwrap());
        assert!(tracker.is_first_run("s2").await.unwrap());
    }
}
