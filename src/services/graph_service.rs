use std::time::Instant;

use tracing::{debug, info};

use crate::models::{ChartGeometry, ItemRef, Theme};
use crate::services::likes_service::{self, FetchPolicy, LikesSource};
use crate::services::{chart_service, series_service};
use crate::utils::errors::{AcquisitionError, GraphError};

/// Produce the likes-history SVG of an item
///
/// The title lookup runs first and never fails the graph. Any acquisition
/// error stops the pipeline before a chart is computed.
pub async fn generate_graph<S: LikesSource + ?Sized>(
    source: &S,
    item: &ItemRef,
    theme: Theme,
    policy: FetchPolicy,
) -> Result<String, GraphError> {
    let started = Instant::now();

    let title = likes_service::resolve_title(source, item).await;
    let likes = likes_service::fetch_all_likes(source, item, policy).await?;

    let series = series_service::build_time_series(&likes);
    debug!("Aggregated {} likes, last day {:?}", likes.len(), series.last().map(|p| p.date));

    let spec = chart_service::build_chart_spec(series, &title, ChartGeometry::default())
        .ok_or(AcquisitionError::Empty)?;
    let svg = chart_service::render_svg(&spec, theme)?;

    info!(
        "Rendered graph for {} ({} likes over {} days) in {}ms",
        item.fallback_label(),
        likes.len(),
        spec.series.len(),
        started.elapsed().as_millis()
    );

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gamebanana::ApiError;
    use crate::models::{LikeEvent, RawPage};
    use async_trait::async_trait;

    /// Two complete days of likes on a single page
    struct OnePageSource {
        name: Option<String>,
        fail: bool,
    }

    #[async_trait]
    impl LikesSource for OnePageSource {
        async fn fetch_page(&self, _item: &ItemRef, page: u32) -> Result<RawPage, ApiError> {
            if self.fail {
                return Err(ApiError::NotFound("no such item".to_string()));
            }
            if page > 1 {
                return Ok(RawPage::default());
            }
            Ok(RawPage {
                records: [1_700_000_000, 1_700_000_100, 1_700_090_000]
                    .into_iter()
                    .map(|ts| LikeEvent { timestamp_seconds: ts })
                    .collect(),
                is_complete: true,
            })
        }

        async fn fetch_display_name(&self, _item: &ItemRef) -> Result<Option<String>, ApiError> {
            Ok(self.name.clone())
        }
    }

    #[tokio::test]
    async fn test_generate_graph() {
        let source = OnePageSource {
            name: Some("Banana Sword".to_string()),
            fail: false,
        };

        let svg = generate_graph(&source, &ItemRef::new("Tool", "1"), Theme::Light, FetchPolicy::default())
            .await
            .expect("graph renders");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Banana Sword"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal() {
        let source = OnePageSource { name: None, fail: true };

        let result =
            generate_graph(&source, &ItemRef::new("Tool", "1"), Theme::Light, FetchPolicy::default()).await;

        assert!(matches!(
            result,
            Err(GraphError::Acquisition(AcquisitionError::PageRequest { page: 1, .. }))
        ));
    }
}
