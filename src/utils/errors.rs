use thiserror::Error;

use crate::api::gamebanana::ApiError;

/// Failure to collect the like feed; aborts the whole graph
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Missing id parameter")]
    MissingId,
    #[error("Invalid {field}: {value}")]
    InvalidItem { field: &'static str, value: String },
    #[error("GameBanana API request for page {page} failed: {source}")]
    PageRequest {
        page: u32,
        #[source]
        source: ApiError,
    },
    #[error("No likes found")]
    Empty,
}

/// Drawing backend failure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

/// Anything that stops a graph from being produced
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Shorten an error chain to its first line, for the error graphic
pub fn extract_clean_error(error_msg: &str) -> String {
    let first_line = error_msg.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() > 60 {
        let truncated: String = first_line.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}
