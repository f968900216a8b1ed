// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::{Mutex, PoisonError};

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};

use crate::mapper::{map_search_query, map_search_response};
use crate::model::{LoadResult, SearchQuery, SearchResult};
use crate::source::SearchDataSource;

pub type SearchOutcome = LoadResult<SearchResult>;

/// Access to content search
pub trait SearchRepository: Send + Sync {
    /// Emits `Loading`, then the outcome of a fresh fetch
    fn search(&self, query: &SearchQuery) -> BoxStream<'_, SearchOutcome>;
}

/// Search repository that always fetches and remembers only the latest outcome
pub struct LiveSearchRepository<D> {
    source: D,
    latest: Mutex<Option<SearchOutcome>>,
}

impl<D: SearchDataSource> LiveSearchRepository<D> {
    pub fn new(source: D) -> Self {
        Self {
            source,
            latest: Mutex::new(None),
        }
    }

    /// The most recent outcome, including `Loading` while a fetch is in flight
    pub fn latest(&self) -> Option<SearchOutcome> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, outcome: SearchOutcome) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
    }

    async fn fetch(&self, query: SearchQuery) -> SearchOutcome {
        let request = map_search_query(&query);
        debug!(
            query = %request.query,
            page = request.page,
            limit = request.limit,
            "searching"
        );

        let outcome: SearchOutcome = self
            .source
            .search(&request)
            .await
            .map(|response| SearchResult {
                query: Some(query.text.clone()),
                ..map_search_response(&response)
            })
            .into();

        match &outcome {
            LoadResult::Success(result) => debug!(count = result.total_count, "search finished"),
            LoadResult::Error(e) => warn!(error = %e, "search failed"),
            LoadResult::Loading => {}
        }

        self.record(outcome.clone());
        outcome
    }
}

impl<D: SearchDataSource> SearchRepository for LiveSearchRepository<D> {
    fn search(&self, query: &SearchQuery) -> BoxStream<'_, SearchOutcome> {
        let query = query.clone();

        stream::once(async move {
            self.record(LoadResult::Loading);
            LoadResult::Loading
        })
        .chain(stream::once(self.fetch(query)))
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::dto::{ContentItemDto, SearchRequest, SearchResponse, SearchSectionDto};
    use crate::error::FetchError;

    struct FixedSource {
        fail: bool,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchDataSource for FixedSource {
        async fn search(&self, _request: &SearchRequest) -> Result<SearchResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Status {
                    url: "https://example.com/search".to_string(),
                    status: 500,
                });
            }

            Ok(SearchResponse {
                sections: vec![SearchSectionDto {
                    name: "Top".to_string(),
                    content: vec![ContentItemDto {
                        podcast_id: Some("p1".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
            })
        }
    }

    #[tokio::test]
    async fn emits_loading_then_result_with_query_echo() {
        let repo = LiveSearchRepository::new(FixedSource::new(false));

        let emitted: Vec<_> = repo.search(&SearchQuery::new("tech")).collect().await;

        assert_eq!(emitted.len(), 2);
        assert!(emitted[0].is_loading());
        let result = emitted[1].success().unwrap();
        assert_eq!(result.query.as_deref(), Some("tech"));
        assert_eq!(result.total_count, 1);
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn every_call_fetches() {
        let repo = LiveSearchRepository::new(FixedSource::new(false));

        let _: Vec<_> = repo.search(&SearchQuery::new("a")).collect().await;
        let _: Vec<_> = repo.search(&SearchQuery::new("a")).collect().await;

        assert_eq!(repo.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_is_terminal_error_and_remembered() {
        let repo = LiveSearchRepository::new(FixedSource::new(true));

        let emitted: Vec<_> = repo.search(&SearchQuery::new("a")).collect().await;

        assert!(emitted[1].is_error());
        assert!(repo.latest().unwrap().is_error());
    }
}
