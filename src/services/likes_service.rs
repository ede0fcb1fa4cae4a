use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::api::gamebanana::{ApiError, GameBananaClient};
use crate::models::{ItemRef, LikeEvent, RawPage};
use crate::utils::errors::AcquisitionError;

/// Where like pages and item titles come from
#[async_trait]
pub trait LikesSource: Send + Sync {
    /// Fetch one 1-based page of the like feed
    async fn fetch_page(&self, item: &ItemRef, page: u32) -> Result<RawPage, ApiError>;

    /// Fetch the human-readable name of the item, if it has one
    async fn fetch_display_name(&self, item: &ItemRef) -> Result<Option<String>, ApiError>;
}

#[async_trait]
impl LikesSource for GameBananaClient {
    async fn fetch_page(&self, item: &ItemRef, page: u32) -> Result<RawPage, ApiError> {
        self.get_likes_page(&item.section, &item.id, page)
            .await
            .map(RawPage::from)
    }

    async fn fetch_display_name(&self, item: &ItemRef) -> Result<Option<String>, ApiError> {
        self.get_profile(&item.section, &item.id)
            .await
            .map(|profile| profile.name.filter(|name| !name.trim().is_empty()))
    }
}

/// Bounds on how much of a feed is fetched and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Hard cap on pages requested for one item
    pub max_pages: u32,
    /// Pages requested concurrently per batch
    pub batch_size: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_pages: 250,
            batch_size: 5,
        }
    }
}

/// Check the item before it is interpolated into request paths
pub fn validate_item(section: &str, id: &str) -> Result<ItemRef, AcquisitionError> {
    let section = section.trim();
    let id = id.trim();

    if id.is_empty() {
        return Err(AcquisitionError::MissingId);
    }
    if section.is_empty() || !section.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AcquisitionError::InvalidItem {
            field: "section",
            value: section.to_string(),
        });
    }
    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AcquisitionError::InvalidItem {
            field: "id",
            value: id.to_string(),
        });
    }

    Ok(ItemRef::new(section, id))
}

/// Title for the legend, falling back to "<section> #<id>"
///
/// A failed lookup never aborts the graph.
pub async fn resolve_title<S: LikesSource + ?Sized>(source: &S, item: &ItemRef) -> String {
    match source.fetch_display_name(item).await {
        Ok(Some(name)) => name,
        Ok(None) => {
            debug!("{} has no display name, using fallback label", item.fallback_label());
            item.fallback_label()
        }
        Err(e) => {
            warn!("Profile lookup for {} failed: {}", item.fallback_label(), e);
            item.fallback_label()
        }
    }
}

/// Outcome of folding one batch into the collected events
enum BatchOutcome {
    Continue,
    Complete,
}

/// Fold a batch in page order, stopping at the first empty or complete page
fn fold_batch(events: &mut Vec<LikeEvent>, pages: &[u32], results: Vec<RawPage>) -> BatchOutcome {
    for (page_num, page) in pages.iter().zip(results) {
        if page.records.is_empty() {
            debug!("Page {} is empty, feed exhausted", page_num);
            return BatchOutcome::Complete;
        }

        events.extend(page.records);

        if page.is_complete {
            debug!("Page {} marked complete", page_num);
            return BatchOutcome::Complete;
        }
    }
    BatchOutcome::Continue
}

/// Fetch every like of an item in concurrent batches of pages
///
/// Each batch is awaited as a whole before the next one starts. Results are
/// folded in page-number order so a completion signal on a lower page wins over
/// records of higher pages in the same batch. Any failed request aborts the
/// acquisition.
pub async fn fetch_all_likes<S: LikesSource + ?Sized>(
    source: &S,
    item: &ItemRef,
    policy: FetchPolicy,
) -> Result<Vec<LikeEvent>, AcquisitionError> {
    let batch_size = policy.batch_size.max(1);
    let mut events: Vec<LikeEvent> = Vec::new();
    let mut current_page: u32 = 1;
    let mut is_complete = false;

    while current_page <= policy.max_pages && !is_complete {
        let last_page = current_page
            .saturating_add(batch_size - 1)
            .min(policy.max_pages);
        let pages: Vec<u32> = (current_page..=last_page).collect();

        debug!("Fetching likes pages {}..={} for {}", current_page, last_page, item.fallback_label());

        let requests = pages.iter().map(|&page| async move {
            source
                .fetch_page(item, page)
                .await
                .map_err(|e| {
                    warn!("Likes page {} failed (status {:?}): {}", page, e.status(), e);
                    AcquisitionError::PageRequest { page, source: e }
                })
        });
        let results = try_join_all(requests).await?;

        if let BatchOutcome::Complete = fold_batch(&mut events, &pages, results) {
            is_complete = true;
        }

        current_page = match current_page.checked_add(batch_size) {
            Some(next) => next,
            None => break,
        };
    }

    if !is_complete {
        warn!(
            "Stopped at page cap {} for {} before the feed completed",
            policy.max_pages,
            item.fallback_label()
        );
    }

    if events.is_empty() {
        return Err(AcquisitionError::Empty);
    }

    info!("Fetched {} likes for {}", events.len(), item.fallback_label());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory feed that records every page requested
    struct MockSource {
        pages: HashMap<u32, RawPage>,
        /// Returned for pages missing from `pages`
        fallback: Option<RawPage>,
        failing_page: Option<u32>,
        name: Result<Option<String>, ()>,
        requested: Mutex<Vec<u32>>,
    }

    impl MockSource {
        fn new(pages: Vec<RawPage>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| (i as u32 + 1, p))
                    .collect(),
                fallback: None,
                failing_page: None,
                name: Ok(None),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            let mut pages = self.requested.lock().unwrap().clone();
            pages.sort_unstable();
            pages
        }
    }

    #[async_trait]
    impl LikesSource for MockSource {
        async fn fetch_page(&self, _item: &ItemRef, page: u32) -> Result<RawPage, ApiError> {
            self.requested.lock().unwrap().push(page);
            if self.failing_page == Some(page) {
                return Err(ApiError::ServerError(500, "boom".to_string()));
            }
            Ok(self
                .pages
                .get(&page)
                .cloned()
                .or_else(|| self.fallback.clone())
                .unwrap_or_default())
        }

        async fn fetch_display_name(&self, _item: &ItemRef) -> Result<Option<String>, ApiError> {
            self.name
                .clone()
                .map_err(|_| ApiError::RequestError("unreachable".to_string()))
        }
    }

    fn page(first_ts: i64, count: usize, is_complete: bool) -> RawPage {
        RawPage {
            records: (0..count)
                .map(|i| LikeEvent { timestamp_seconds: first_ts + i as i64 })
                .collect(),
            is_complete,
        }
    }

    fn item() -> ItemRef {
        ItemRef::new("Tool", "19049")
    }

    fn policy(max_pages: u32, batch_size: u32) -> FetchPolicy {
        FetchPolicy { max_pages, batch_size }
    }

    #[tokio::test]
    async fn test_completion_mid_batch_folds_nothing_past_it() {
        let mut source = MockSource::new(vec![
            page(100, 15, false),
            page(200, 15, false),
            page(300, 15, false),
            page(400, 2, true),
        ]);
        // Anything past page 4 would be a bug if it ended up in the result
        source.fallback = Some(page(9_000, 15, false));

        let events = fetch_all_likes(&source, &item(), policy(250, 5))
            .await
            .expect("fetch succeeds");

        assert_eq!(events.len(), 47);
        assert!(events.iter().all(|e| e.timestamp_seconds < 9_000));
        // The whole batch is launched before any page is folded, so page 5 is
        // still requested. Only the fold stops at page 4, and no second batch starts.
        assert_eq!(source.requested(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_completion_stops_before_next_batch() {
        let mut source = MockSource::new(vec![
            page(100, 15, false),
            page(200, 15, false),
            page(300, 15, false),
            page(400, 2, true),
        ]);
        source.fallback = Some(page(9_000, 15, false));

        let events = fetch_all_likes(&source, &item(), policy(250, 2))
            .await
            .expect("fetch succeeds");

        assert_eq!(events.len(), 47);
        assert_eq!(source.requested(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_empty_page_terminates() {
        let mut source = MockSource::new(vec![page(100, 15, false), RawPage::default()]);
        source.fallback = Some(page(9_000, 15, false));

        let events = fetch_all_likes(&source, &item(), policy(250, 5))
            .await
            .expect("fetch succeeds");

        assert_eq!(events.len(), 15);
    }

    #[tokio::test]
    async fn test_page_cap_returns_collected_events() {
        let mut source = MockSource::new(Vec::new());
        source.fallback = Some(page(100, 10, false));

        let events = fetch_all_likes(&source, &item(), policy(7, 5))
            .await
            .expect("capped fetch still succeeds");

        assert_eq!(events.len(), 70);
        assert_eq!(source.requested(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_no_likes_is_an_error() {
        let source = MockSource::new(vec![RawPage::default()]);

        let result = fetch_all_likes(&source, &item(), policy(250, 5)).await;

        assert!(matches!(result, Err(AcquisitionError::Empty)));
    }

    #[tokio::test]
    async fn test_complete_flag_with_no_records_is_empty() {
        let source = MockSource::new(vec![RawPage { records: Vec::new(), is_complete: true }]);

        let result = fetch_all_likes(&source, &item(), policy(250, 5)).await;

        assert!(matches!(result, Err(AcquisitionError::Empty)));
    }

    #[tokio::test]
    async fn test_failed_page_aborts() {
        let mut source = MockSource::new(vec![page(100, 15, false), page(200, 15, false)]);
        source.fallback = Some(page(300, 15, false));
        source.failing_page = Some(7);

        let result = fetch_all_likes(&source, &item(), policy(250, 5)).await;

        match result {
            Err(AcquisitionError::PageRequest { page, source }) => {
                assert_eq!(page, 7);
                assert_eq!(source.status(), Some(500));
            }
            other => panic!("expected page error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_title() {
        let mut source = MockSource::new(Vec::new());
        source.name = Ok(Some("Banana Sword".to_string()));
        assert_eq!(resolve_title(&source, &item()).await, "Banana Sword");

        source.name = Ok(None);
        assert_eq!(resolve_title(&source, &item()).await, "Tool #19049");

        source.name = Err(());
        assert_eq!(resolve_title(&source, &item()).await, "Tool #19049");
    }

    #[test]
    fn test_validate_item() {
        assert_eq!(validate_item(" Tool ", "19049").unwrap(), item());
        assert!(matches!(validate_item("Tool", " "), Err(AcquisitionError::MissingId)));
        assert!(matches!(
            validate_item("Tool/../x", "1"),
            Err(AcquisitionError::InvalidItem { field: "section", .. })
        ));
        assert!(matches!(
            validate_item("Tool", "12?a=b"),
            Err(AcquisitionError::InvalidItem { field: "id", .. })
        ));
    }
}
