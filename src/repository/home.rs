// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, info, warn};

use crate::mapper::map_home_sections_response;
use crate::model::{ContentSection, LoadResult, sort_sections};
use crate::source::HomeDataSource;

pub type SectionsResult = LoadResult<Vec<ContentSection>>;

/// Access to the home feed
#[async_trait]
pub trait HomeRepository: Send + Sync {
    /// Stream the home sections.
    ///
    /// The first call emits `Loading` followed by the fetched outcome. Later
    /// calls replay the cached outcome without fetching again.
    fn get_home_sections(&self) -> BoxStream<'_, SectionsResult>;

    /// Fetch again and replace the cached outcome, whatever it is
    async fn refresh_home_sections(&self) -> SectionsResult;
}

/// Home repository keeping the last outcome in memory.
///
/// Errors are cached like successes: after a failed refresh a plain get
/// replays the failure until the next refresh.
pub struct CachingHomeRepository<D> {
    source: D,
    cache: Mutex<Option<SectionsResult>>,
}

impl<D: HomeDataSource> CachingHomeRepository<D> {
    pub fn new(source: D) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
        }
    }

    /// The cached outcome, if any fetch has completed
    pub fn cached(&self) -> Option<SectionsResult> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, result: SectionsResult) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
    }

    async fn fetch_and_cache(&self) -> SectionsResult {
        let result: SectionsResult = self
            .source
            .get_home_sections()
            .await
            .map(|response| {
                let mut sections = map_home_sections_response(&response);
                sort_sections(&mut sections);
                sections
            })
            .into();

        match &result {
            LoadResult::Success(sections) => info!(count = sections.len(), "home sections loaded"),
            LoadResult::Error(e) => warn!(error = %e, "failed to load home sections"),
            LoadResult::Loading => {}
        }

        self.store(result.clone());
        result
    }
}

#[async_trait]
impl<D: HomeDataSource> HomeRepository for CachingHomeRepository<D> {
    fn get_home_sections(&self) -> BoxStream<'_, SectionsResult> {
        // Checked when the stream is first polled, not when it is created
        stream::once(async move { self.cached() })
            .flat_map(move |cached| match cached {
                Some(result) => {
                    debug!("serving home sections from cache");
                    stream::once(future::ready(result)).boxed()
                }
                None => stream::once(future::ready(LoadResult::Loading))
                    .chain(stream::once(self.fetch_and_cache()))
                    .boxed(),
            })
            .boxed()
    }

    async fn refresh_home_sections(&self) -> SectionsResult {
        debug!("refreshing home sections");
        self.fetch_and_cache().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::dto::{ContentItemDto, HomeSectionDto, HomeSectionsResponse};
    use crate::error::FetchError;

    /// Serves queued outcomes in order, repeating the last one
    struct ScriptedSource {
        outcomes: Mutex<Vec<Result<HomeSectionsResponse, FetchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<HomeSectionsResponse, FetchError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HomeDataSource for ScriptedSource {
        async fn get_home_sections(&self) -> Result<HomeSectionsResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                match &outcomes[0] {
                    Ok(response) => Ok(response.clone()),
                    Err(_) => Err(offline()),
                }
            }
        }
    }

    fn offline() -> FetchError {
        FetchError::Unreachable {
            url: "https://example.com/home_sections".to_string(),
            reason: "network is unreachable".to_string(),
        }
    }

    fn section(title: &str, order: i64) -> HomeSectionDto {
        HomeSectionDto {
            title: title.to_string(),
            layout: "queue".to_string(),
            section_type: "podcast".to_string(),
            items: vec![ContentItemDto {
                podcast_id: Some(format!("{title}-pod")),
                ..Default::default()
            }],
            order: Some(order),
            ..Default::default()
        }
    }

    fn response(sections: Vec<HomeSectionDto>) -> HomeSectionsResponse {
        HomeSectionsResponse {
            sections,
            pagination: None,
        }
    }

    fn titles(result: &SectionsResult) -> Vec<String> {
        result
            .success()
            .unwrap()
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }

    #[tokio::test]
    async fn first_get_emits_loading_then_success() {
        let repo = CachingHomeRepository::new(ScriptedSource::new(vec![Ok(response(vec![
            section("A", 1),
        ]))]));

        let emitted: Vec<_> = repo.get_home_sections().collect().await;

        assert_eq!(emitted.len(), 2);
        assert!(emitted[0].is_loading());
        assert_eq!(titles(&emitted[1]), ["A"]);
    }

    #[tokio::test]
    async fn second_get_replays_cache_without_fetching() {
        let repo = CachingHomeRepository::new(ScriptedSource::new(vec![Ok(response(vec![
            section("A", 1),
        ]))]));

        let _: Vec<_> = repo.get_home_sections().collect().await;
        let second: Vec<_> = repo.get_home_sections().collect().await;

        assert_eq!(second.len(), 1);
        assert!(second[0].is_success());
        assert_eq!(repo.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sections_are_sorted_by_order_regardless_of_input_order() {
        let ordered = vec![section("A", 1), section("B", 2), section("C", 3)];
        let shuffled = vec![section("C", 3), section("A", 1), section("B", 2)];

        let a = CachingHomeRepository::new(ScriptedSource::new(vec![Ok(response(ordered))]));
        let b = CachingHomeRepository::new(ScriptedSource::new(vec![Ok(response(shuffled))]));

        let from_ordered = a.refresh_home_sections().await;
        let from_shuffled = b.refresh_home_sections().await;

        assert_eq!(titles(&from_ordered), ["A", "B", "C"]);
        assert_eq!(from_ordered.success(), from_shuffled.success());
    }

    #[tokio::test]
    async fn refresh_always_fetches_and_replaces_cache() {
        let repo = CachingHomeRepository::new(ScriptedSource::new(vec![
            Ok(response(vec![section("Old", 1)])),
            Ok(response(vec![section("New", 1)])),
        ]));

        let _: Vec<_> = repo.get_home_sections().collect().await;
        let refreshed = repo.refresh_home_sections().await;
        assert_eq!(titles(&refreshed), ["New"]);

        let replay: Vec<_> = repo.get_home_sections().collect().await;
        assert_eq!(titles(&replay[0]), ["New"]);
        assert_eq!(repo.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_is_cached_and_replayed() {
        let repo = CachingHomeRepository::new(ScriptedSource::new(vec![
            Ok(response(vec![section("A", 1)])),
            Err(offline()),
        ]));

        let _: Vec<_> = repo.get_home_sections().collect().await;
        let refreshed = repo.refresh_home_sections().await;
        assert!(refreshed.is_error());

        let replay: Vec<_> = repo.get_home_sections().collect().await;
        assert_eq!(replay.len(), 1);
        assert!(replay[0].error().unwrap().is_network_unavailable());
        assert_eq!(repo.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn source_error_passes_through_unchanged() {
        let repo = CachingHomeRepository::new(ScriptedSource::new(vec![Err(offline())]));

        let emitted: Vec<_> = repo.get_home_sections().collect().await;

        assert!(emitted[0].is_loading());
        let error = emitted[1].error().unwrap();
        assert_eq!(error.to_string(), offline().to_string());
    }
}
