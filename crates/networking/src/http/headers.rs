//! Static header tables impersonating the webapp client

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};

/// Base header set sent with every request to the backend
///
/// Mirrors what the webview client sends; the user agent comes from the
/// per-session config so different accounts don't share a fingerprint.
pub fn base_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert("accept", HeaderValue::from_static("*/*"));
    headers.insert(
        "accept-language",
        HeaderValue::from_static("ru,en;q=0.9,en-GB;q=0.8,en-US;q=0.7"),
    );
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert(
        "origin",
        HeaderValue::from_static("https://gift-static.stepcdn.space"),
    );
    headers.insert("priority", HeaderValue::from_static("u=1, i"));
    headers.insert(
        "referer",
        HeaderValue::from_static("https://gift-static.stepcdn.space/"),
    );
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Microsoft Edge\";v=\"142\", \"Microsoft Edge WebView2\";v=\"142\", \"Chromium\";v=\"142\", \"Not_A Brand\";v=\"99\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    headers.insert("x-platform", HeaderValue::from_static("tdesktop"));
    headers.insert("x-service-name", HeaderValue::from_static("gift"));
    headers.insert("x-timezone-offset", HeaderValue::from_static("-180"));

    if let Ok(ua) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, ua);
    }

    headers
}

/// Headers for the login call: the raw webapp payload rides in the
/// authorization header with the `tma` scheme instead of a bearer token.
pub fn login_headers(user_agent: &str, init_data: &str) -> HeaderMap {
    let mut headers = base_headers(user_agent);
    if let Ok(value) = HeaderValue::from_str(&format!("tma {}", init_data)) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_headers_carry_tma_scheme() {
        let headers = login_headers("UA/1.0", "query_id=abc&user=def");
        let auth = headers.get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(auth.starts_with("tma "));
        assert_eq!(headers.get(USER_AGENT).unwrap(), "UA/1.0");
    }

    #[test]
    fn base_headers_have_no_authorization() {
        let headers = base_headers("UA/1.0");
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get("x-service-name").unwrap(), "gift");
    }
}
