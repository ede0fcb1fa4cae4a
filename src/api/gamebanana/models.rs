use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{LikeEvent, RawPage};

/// One record of the `Likes` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRecord {
    #[serde(rename = "_tsDateAdded")]
    pub date_added: i64,
}

/// Paging metadata of the `Likes` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LikesMetadata {
    #[serde(rename = "_bIsComplete", default)]
    pub is_complete: bool,
    #[serde(rename = "_nRecordCount", default)]
    pub record_count: Option<u64>,
}

/// Response from GET `{section}/{id}/Likes?_nPage={n}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesPageResponse {
    #[serde(rename = "_aRecords", default)]
    pub records: Vec<LikeRecord>,
    #[serde(rename = "_aMetadata", default)]
    pub metadata: LikesMetadata,
}

impl From<LikesPageResponse> for RawPage {
    fn from(response: LikesPageResponse) -> Self {
        let total = response.records.len();
        let records: Vec<LikeEvent> = response
            .records
            .into_iter()
            .filter_map(|r| LikeEvent::from_timestamp(r.date_added))
            .collect();

        if records.len() != total {
            debug!("Dropped {} like records with unusable timestamps", total - records.len());
        }
        if let Some(count) = response.metadata.record_count {
            debug!("Feed reports {} likes in total", count);
        }

        RawPage {
            records,
            is_complete: response.metadata.is_complete,
        }
    }
}

/// Response from GET `{section}/{id}/ProfilePage`, only the fields we read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePageResponse {
    #[serde(rename = "_sName", default)]
    pub name: Option<String>,
}

/// Error response from the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "_sMessage", default)]
    pub message: Option<String>,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited(String),
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl ApiError {
    /// HTTP status behind the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited(_) => Some(429),
            ApiError::ServerError(code, _) | ApiError::HttpError(code, _) => Some(*code as u16),
            ApiError::RequestError(_) | ApiError::DeserializationError(_) => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_likes_page() {
        let body = r#"{
            "_aMetadata": {"_nRecordCount": 42, "_nPerpage": 15, "_bIsComplete": false},
            "_aRecords": [
                {"_idRow": 1, "_tsDateAdded": 1700000000, "_aMember": {"_sName": "a"}},
                {"_idRow": 2, "_tsDateAdded": 1700086400}
            ]
        }"#;

        let response: LikesPageResponse = serde_json::from_str(body).expect("valid page");
        assert_eq!(response.records.len(), 2);
        assert_eq!(response.metadata.record_count, Some(42));

        let page = RawPage::from(response);
        assert!(!page.is_complete);
        assert_eq!(page.records[1].timestamp_seconds, 1_700_086_400);
    }

    #[test]
    fn test_missing_fields_mean_empty_page() {
        let response: LikesPageResponse = serde_json::from_str("{}").expect("valid page");
        let page = RawPage::from(response);
        assert!(page.records.is_empty());
        assert!(!page.is_complete);
    }

    #[test]
    fn test_profile_without_name() {
        let profile: ProfilePageResponse =
            serde_json::from_str(r#"{"_idRow": 19049}"#).expect("valid profile");
        assert!(profile.name.is_none());

        let profile: ProfilePageResponse =
            serde_json::from_str(r#"{"_sName": "Banana Sword"}"#).expect("valid profile");
        assert_eq!(profile.name.as_deref(), Some("Banana Sword"));
    }
}
