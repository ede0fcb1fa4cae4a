use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use super::models::{ApiError, ErrorResponse, LikesPageResponse, ProfilePageResponse};
use tracing::{debug, warn};

/// GameBanana `apiv11` client for the like feed and profile pages
#[derive(Clone)]
pub struct GameBananaClient {
    http_client: HttpClient,
    base_url: String,
}

impl GameBananaClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://gamebanana.com/apiv11";

    /// Create a client with custom base URL and request timeout
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .default_headers(Self::create_headers())
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("banana-likes/", env!("CARGO_PKG_VERSION"))),
        );
        headers
    }

    pub fn likes_url(&self, section: &str, id: &str, page: u32) -> String {
        format!("{}/{}/{}/Likes?_nPage={}", self.base_url, section, id, page)
    }

    pub fn profile_url(&self, section: &str, id: &str) -> String {
        format!("{}/{}/{}/ProfilePage", self.base_url, section, id)
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        // GameBanana wraps most errors in a JSON body with a message
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Rate limited by GameBanana: {}", message);
                ApiError::RateLimited(message)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code as i32, message)
            }
            _ => ApiError::HttpError(status_code as i32, message),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /{section}/{id}/Likes?_nPage={page}
    ///
    /// Retrieves one page of the like feed of an item. Pages are 1-based.
    pub async fn get_likes_page(
        &self,
        section: &str,
        id: &str,
        page: u32,
    ) -> Result<LikesPageResponse, ApiError> {
        let url = self.likes_url(section, id, page);
        self.get_json(&url).await
    }

    /// GET /{section}/{id}/ProfilePage
    ///
    /// Retrieves the profile of an item; only the display name is read.
    pub async fn get_profile(
        &self,
        section: &str,
        id: &str,
    ) -> Result<ProfilePageResponse, ApiError> {
        let url = self.profile_url(section, id);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = GameBananaClient::with_base_url(
            "https://example.test/apiv11/".to_string(),
            Duration::from_secs(5),
        )
        .expect("client builds");

        assert_eq!(
            client.likes_url("Tool", "19049", 3),
            "https://example.test/apiv11/Tool/19049/Likes?_nPage=3"
        );
        assert_eq!(
            client.profile_url("Mod", "1"),
            "https://example.test/apiv11/Mod/1/ProfilePage"
        );
    }
}
