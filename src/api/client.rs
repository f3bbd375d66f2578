use std::time::Duration;

use reqwest::{Client, Request};
use thiserror::Error;

use super::response::SearchResponse;
use crate::config::Settings;

const USER_AGENT: &str = concat!("image-finder/", env!("CARGO_PKG_VERSION"));

/// Error bodies longer than this are cut before they reach the UI
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no API key configured, set PIXABAY_API_KEY or add api_key to settings.json")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Build the HTTP client shared by search requests and image downloads.
/// Proxy settings come from the standard environment variables.
pub fn build_http_client(settings: &Settings) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(settings.timeout())
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(ApiError::Transport)
}

/// Client for the Pixabay image search endpoint.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted,
/// so each background task gets its own handle.
#[derive(Clone)]
pub struct PixabayClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    per_page: u32,
}

impl PixabayClient {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            per_page: settings.per_page,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the GET request for one page of results
    pub fn request(&self, query: &str, page: u32) -> Result<Request, ApiError> {
        let key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let page = page.to_string();
        let per_page = self.per_page.to_string();

        self.http
            .get(&self.base_url)
            .query(&[
                ("key", key),
                ("q", query),
                ("page", page.as_str()),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("per_page", per_page.as_str()),
            ])
            .build()
            .map_err(ApiError::Transport)
    }

    /// Fetch one page of results for `query`
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, ApiError> {
        let request = self.request(query, page)?;
        tracing::debug!("🌐 GET {} (page {})", self.base_url, page);

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_body(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = response.bytes().await?;
        let decoded: SearchResponse = serde_json::from_slice(&bytes)?;
        tracing::info!(
            "🔎 \"{}\" page {}: {} hits ({} reachable)",
            query,
            page,
            decoded.hits.len(),
            decoded.total_hits
        );
        Ok(decoded)
    }
}

/// Trim `body` and cut it to `max` characters, marking the cut with `…`
fn truncate_body(body: &str, max: usize) -> String {
    let body = body.trim();
    match body.char_indices().nth(max) {
        Some((end, _)) => format!("{}…", &body[..end]),
        None => body.to_string(),
    }
}

impl std::fmt::Debug for PixabayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key
        f.debug_struct("PixabayClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("per_page", &self.per_page)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn client(api_key: Option<&str>) -> PixabayClient {
        let settings = Settings {
            api_key: api_key.map(String::from),
            ..Settings::default()
        };
        let http = build_http_client(&settings).unwrap();
        PixabayClient::new(http, &settings)
    }

    #[test]
    fn test_request_carries_search_parameters() {
        let request = client(Some("secret")).request("red fox", 3).unwrap();
        let url = request.url();

        assert_eq!(url.host_str(), Some("pixabay.com"));
        assert_eq!(url.path(), "/api/");

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(params["key"], "secret");
        assert_eq!(params["q"], "red fox");
        assert_eq!(params["page"], "3");
        assert_eq!(params["image_type"], "photo");
        assert_eq!(params["orientation"], "horizontal");
        assert_eq!(params["per_page"], "12");
    }

    #[test]
    fn test_missing_key_is_reported_before_sending() {
        let err = client(None).request("cats", 1).unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
    }

    #[test]
    fn test_short_error_body_kept() {
        assert_eq!(
            truncate_body("  [ERROR 400] \"key\" is invalid\n", MAX_ERROR_BODY_CHARS),
            "[ERROR 400] \"key\" is invalid"
        );
    }

    #[test]
    fn test_long_error_body_cut() {
        let page = format!("<html>{}</html>", "é".repeat(1000));
        let cut = truncate_body(&page, MAX_ERROR_BODY_CHARS);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(cut.starts_with("<html>"));
        assert!(cut.ends_with('…'));

        let err = ApiError::Status { status: 502, body: cut };
        assert!(err.to_string().len() < 600);
    }

    #[test]
    fn test_debug_hides_key() {
        let printed = format!("{:?}", client(Some("secret")));
        assert!(!printed.contains("secret"));
        assert!(printed.contains("has_api_key: true"));
    }
}
