//! GiftFest HTTP client with bearer-token authentication and one-shot
//! re-login on auth-class failures

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use giftfest_core::config::REQUEST_TIMEOUT_SECS;
use giftfest_core::{
    AuthSession, BotSettings, Error, LoginResponse, ReferralData, Result, SessionConfig,
};

use crate::auth::AuthPayloadProvider;
use crate::http::headers::{base_headers, login_headers};
use crate::http::retry::{RetryBudget, RetryStep, SendOutcome, MAX_ATTEMPTS};

/// How a response status is handled by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200: parse the body
    Ok,
    /// Authentication or transient server fault: re-login once, retry once
    AuthRetry,
    /// Everything else: soft failure, no data this cycle
    Soft,
}

impl StatusClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => StatusClass::Ok,
            401 | 403 | 418 | 502 => StatusClass::AuthRetry,
            _ => StatusClass::Soft,
        }
    }
}

/// HTTP client for the GiftFest backend
///
/// Bound at construction to one session, one optional proxy, and a 60s
/// request timeout. Owned exclusively by one bot instance; requests are
/// strictly sequential, so no internal locking is needed.
pub struct GiftFestClient {
    http: Client,
    api_base: String,
    session_name: String,
    user_agent: String,
    ref_param: String,
    auth: Option<AuthSession>,
    provider: Arc<dyn AuthPayloadProvider>,
    proxy: Option<String>,
}

impl GiftFestClient {
    /// Build a client bound to the given proxy (or none)
    pub fn new(
        config: &SessionConfig,
        settings: &BotSettings,
        proxy: Option<&str>,
        ref_param: String,
        provider: Arc<dyn AuthPayloadProvider>,
    ) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

        if let Some(url) = proxy {
            let proxy = reqwest::Proxy::all(url)
                .map_err(|e| Error::Config(format!("invalid proxy {}: {}", url, e)))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: settings.api_base.clone(),
            session_name: config.session_name.clone(),
            user_agent: config.user_agent.clone(),
            ref_param,
            auth: None,
            provider,
            proxy: proxy.map(|p| p.to_string()),
        })
    }

    /// Session name this client is bound to
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    /// User agent this client impersonates
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Proxy URL this client is bound to, if any
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Full header set with the bearer token overlaid when one is held
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = base_headers(&self.user_agent);
        if let Some(session) = &self.auth {
            if let Ok(value) =
                HeaderValue::from_str(&format!("Bearer {}", session.access_token))
            {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    /// Log in with the raw webapp payload
    ///
    /// On success the whole auth session is replaced; on any failure the
    /// prior session state is left untouched and `false` is returned.
    pub async fn login(&mut self, init_data: &str, referral: Option<&ReferralData>) -> bool {
        let headers = login_headers(&self.user_agent, init_data);
        let body = match referral {
            Some(referral) => {
                info!(
                    session = %self.session_name,
                    code = %referral.referral_code,
                    source = %referral.referral_source,
                    "First run, logging in with referral data"
                );
                serde_json::json!(referral)
            }
            None => serde_json::json!({}),
        };

        let url = format!("{}/auth/new", self.api_base);
        let outcome = self.send_once(Method::POST, &url, headers, Some(&body)).await;

        let value = match outcome {
            SendOutcome::Success(value) => value,
            SendOutcome::AuthFault(status) => {
                error!(session = %self.session_name, status, "Login rejected");
                return false;
            }
            SendOutcome::Soft => {
                error!(session = %self.session_name, "Login request failed");
                return false;
            }
        };

        let response: LoginResponse = match serde_json::from_value(value) {
            Ok(response) => response,
            Err(e) => {
                error!(session = %self.session_name, "Malformed login response: {}", e);
                return false;
            }
        };

        match response.access_token {
            Some(access_token) => {
                self.auth = Some(AuthSession {
                    access_token,
                    refresh_token: response.refresh_token,
                    raw_init_data: init_data.to_string(),
                });
                match response.referral_code {
                    Some(code) => info!(
                        session = %self.session_name,
                        referral_code = %code,
                        "Login successful"
                    ),
                    None => info!(session = %self.session_name, "Login successful"),
                }
                true
            }
            None => {
                error!(session = %self.session_name, "Login response carried no access token");
                false
            }
        }
    }

    /// Issue a request with the bounded retry contract
    ///
    /// `Ok(Some(value))` on 200 (an unparsable body degrades to an empty
    /// object), `Ok(None)` on soft failure, `Err(SessionInvalid)` when an
    /// auth-class status cannot be cured by one re-login.
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Option<Value>> {
        let url = format!("{}/{}", self.api_base, path);
        let mut budget = RetryBudget::new(MAX_ATTEMPTS);

        loop {
            let mut headers = self.auth_headers();
            if let Some(extra) = &extra_headers {
                for (name, value) in extra {
                    headers.insert(name.clone(), value.clone());
                }
            }

            let outcome = self.send_once(method.clone(), &url, headers, body).await;
            match budget.next(outcome) {
                RetryStep::Deliver(value) => return Ok(Some(value)),
                RetryStep::GiveUp => return Ok(None),
                RetryStep::Fatal(status) => {
                    return Err(Error::SessionInvalid(format!(
                        "status {} repeated after re-login",
                        status
                    )));
                }
                RetryStep::Reauthenticate(status) => {
                    warn!(
                        session = %self.session_name,
                        status,
                        "Auth-class status, attempting re-login"
                    );
                    self.reauthenticate().await?;
                    info!(session = %self.session_name, "Re-login successful, retrying request");
                }
            }
        }
    }

    /// Fetch a fresh payload from the Telegram collaborator and log in again
    async fn reauthenticate(&mut self) -> Result<()> {
        let payload = self.provider.fetch_auth_payload(&self.ref_param).await?;
        if self.login(&payload.init_data, None).await {
            Ok(())
        } else {
            error!(session = %self.session_name, "Re-login failed, session invalid");
            Err(Error::SessionInvalid(
                "access token expired and could not be refreshed".to_string(),
            ))
        }
    }

    /// One attempt: send, classify the status, parse on 200
    async fn send_once(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> SendOutcome {
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(session = %self.session_name, url, "Request error: {}", e);
                return SendOutcome::Soft;
            }
        };

        let status = response.status().as_u16();
        debug!(session = %self.session_name, url, status, "Response received");

        match StatusClass::from_status(status) {
            StatusClass::Ok => {
                // An empty or unparsable success body still counts as success
                let value = response
                    .json::<Value>()
                    .await
                    .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
                SendOutcome::Success(value)
            }
            StatusClass::AuthRetry => SendOutcome::AuthFault(status),
            StatusClass::Soft => {
                error!(session = %self.session_name, url, status, "Request failed");
                SendOutcome::Soft
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_class_statuses_trigger_relogin() {
        for status in [401, 403, 418, 502] {
            assert_eq!(StatusClass::from_status(status), StatusClass::AuthRetry);
        }
    }

    #[test]
    fn only_200_is_success() {
        assert_eq!(StatusClass::from_status(200), StatusClass::Ok);
        for status in [201, 204, 400, 404, 429, 500, 503] {
            assert_eq!(StatusClass::from_status(status), StatusClass::Soft);
        }
    }
}
