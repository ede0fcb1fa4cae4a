use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::models::{ItemRef, Theme};
use crate::services::{graph_service, likes_service};
use crate::state::AppState;
use crate::utils::errors::{extract_clean_error, AcquisitionError};
use crate::utils::svg::error_svg;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Debug, Default, Deserialize)]
pub struct GraphQuery {
    pub section: Option<String>,
    pub id: Option<String>,
    pub theme: Option<String>,
}

impl GraphQuery {
    /// Apply defaults for absent parameters and validate the item
    pub fn item(&self, default_section: &str, default_id: &str) -> Result<ItemRef, AcquisitionError> {
        let section = self.section.as_deref().unwrap_or(default_section);
        let id = self.id.as_deref().unwrap_or(default_id);
        likes_service::validate_item(section, id)
    }

    pub fn theme(&self) -> Theme {
        self.theme.as_deref().map(Theme::parse).unwrap_or_default()
    }
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/graph", get(graph))
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Headers of a successfully rendered graph
fn svg_headers(max_age_secs: u64) -> [(HeaderName, String); 2] {
    [
        (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
        (
            header::CACHE_CONTROL,
            format!("public, max-age={0}, s-maxage={0}", max_age_secs),
        ),
    ]
}

async fn graph(State(state): State<Arc<AppState>>, Query(q): Query<GraphQuery>) -> Response {
    let config = &state.config;

    let item = match q.item(&config.default_section, &config.default_id) {
        Ok(item) => item,
        Err(e) => return bad_request(e.to_string()),
    };
    let theme = q.theme();

    info!("📈 Graph requested for {} ({:?} theme)", item.fallback_label(), theme);

    match graph_service::generate_graph(&state.client, &item, theme, config.fetch_policy).await {
        Ok(svg) => (StatusCode::OK, svg_headers(config.cache_max_age_secs), svg).into_response(),
        Err(e) => {
            error!("Error generating graph for {}: {}", item.fallback_label(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string())],
                error_svg(&extract_clean_error(&e.to_string())),
            )
                .into_response()
        }
    }
}
