// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{ContentSection, LoadResult};
use crate::usecase::{GetHomeSections, RefreshHomeSections};

use super::store::{EffectReceiver, Store, TaskScope, failure_message, retry_action};

const LOAD_FAILED: &str = "Failed to load content";
const REFRESH_FAILED: &str = "Failed to refresh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeIntent {
    Load,
    Refresh,
    SectionClicked(String),
    ItemClicked(String),
    ClearError,
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEffect {
    NavigateToSection(String),
    NavigateToContentDetail(String),
    /// Transient notice; `action` labels a retry button when one makes sense
    ShowErrorSnackbar {
        message: String,
        action: Option<String>,
    },
    ShowRefreshSuccess,
}

/// Everything the home screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeState {
    pub sections: Vec<ContentSection>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub error_message: Option<String>,
    pub is_empty: bool,
}

impl HomeState {
    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn should_show_content(&self) -> bool {
        !self.sections.is_empty() && !self.has_error()
    }

    pub fn should_show_empty_state(&self) -> bool {
        self.is_empty && !self.is_loading && !self.has_error()
    }

    pub fn should_show_error_state(&self) -> bool {
        self.has_error() && !self.is_loading
    }
}

fn error_snackbar(error: &FetchError, message: String) -> HomeEffect {
    HomeEffect::ShowErrorSnackbar {
        message,
        action: retry_action(error),
    }
}

/// State holder behind the home screen.
///
/// Loading starts on construction. Dropping the holder aborts any fetch it
/// started.
pub struct HomeStateHolder {
    store: Arc<Store<HomeState, HomeEffect>>,
    get_sections: GetHomeSections,
    refresh_sections: RefreshHomeSections,
    scope: TaskScope,
}

impl HomeStateHolder {
    /// Must be called from within a tokio runtime
    pub fn new(
        get_sections: GetHomeSections,
        refresh_sections: RefreshHomeSections,
    ) -> (Self, EffectReceiver<HomeEffect>) {
        let (store, effects) = Store::new(HomeState {
            is_loading: true,
            ..Default::default()
        });

        let holder = Self {
            store: Arc::new(store),
            get_sections,
            refresh_sections,
            scope: TaskScope::default(),
        };
        holder.handle_intent(HomeIntent::Load);

        (holder, effects)
    }

    pub fn state(&self) -> watch::Receiver<HomeState> {
        self.store.subscribe()
    }

    pub fn current_state(&self) -> HomeState {
        self.store.current()
    }

    pub fn handle_intent(&self, intent: HomeIntent) {
        debug!(?intent, "home intent");

        match intent {
            HomeIntent::Load | HomeIntent::Retry => self.load(),
            HomeIntent::Refresh => self.refresh(),
            HomeIntent::SectionClicked(id) => {
                self.store.send_effect(HomeEffect::NavigateToSection(id));
            }
            HomeIntent::ItemClicked(id) => {
                self.store.send_effect(HomeEffect::NavigateToContentDetail(id));
            }
            HomeIntent::ClearError => self.store.set_state(|s| HomeState {
                error_message: None,
                ..s.clone()
            }),
        }
    }

    fn load(&self) {
        let store = Arc::clone(&self.store);
        let use_case = self.get_sections.clone();

        self.scope.spawn(async move {
            let mut results = use_case.execute();

            while let Some(result) = results.next().await {
                match result {
                    LoadResult::Loading => store.set_state(|s| HomeState {
                        is_loading: true,
                        error_message: None,
                        ..s.clone()
                    }),
                    LoadResult::Success(sections) => store.set_state(move |s| HomeState {
                        is_empty: sections.is_empty(),
                        sections,
                        is_loading: false,
                        error_message: None,
                        ..s.clone()
                    }),
                    LoadResult::Error(error) => {
                        let message = failure_message(&error, LOAD_FAILED);
                        store.set_state(|s| HomeState {
                            is_loading: false,
                            error_message: Some(message.clone()),
                            is_empty: s.sections.is_empty(),
                            ..s.clone()
                        });
                        store.send_effect(error_snackbar(&error, message));
                    }
                }
            }
        });
    }

    fn refresh(&self) {
        // Guard and flag are set in one step so a second refresh cannot slip in
        let started = self.store.update_if(|s| {
            (!s.is_refreshing).then(|| HomeState {
                is_refreshing: true,
                error_message: None,
                ..s.clone()
            })
        });
        if !started {
            debug!("refresh already in progress, ignoring");
            return;
        }

        let store = Arc::clone(&self.store);
        let use_case = self.refresh_sections.clone();

        self.scope.spawn(async move {
            match use_case.execute().await {
                LoadResult::Success(sections) => {
                    store.set_state(move |s| HomeState {
                        is_empty: sections.is_empty(),
                        sections,
                        is_refreshing: false,
                        error_message: None,
                        ..s.clone()
                    });
                    store.send_effect(HomeEffect::ShowRefreshSuccess);
                }
                LoadResult::Error(error) => {
                    let message = failure_message(&error, REFRESH_FAILED);
                    store.set_state(|s| HomeState {
                        is_refreshing: false,
                        error_message: Some(message.clone()),
                        ..s.clone()
                    });
                    store.send_effect(error_snackbar(&error, message));
                }
                LoadResult::Loading => store.set_state(|s| HomeState {
                    is_refreshing: false,
                    ..s.clone()
                }),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use futures::stream::{self, BoxStream};

    use crate::dto::HomeSectionsResponse;
    use crate::model::{SectionLayout, SectionType};
    use crate::repository::{CachingHomeRepository, HomeRepository, SectionsResult};
    use crate::source::HomeDataSource;

    fn section(title: &str) -> ContentSection {
        ContentSection {
            id: format!("{title}_1"),
            title: title.to_string(),
            section_type: SectionType::Podcasts,
            layout: SectionLayout::BinaryGrid,
            items: vec![],
            order: 1,
            has_more: false,
            next_page_url: None,
        }
    }

    fn offline() -> FetchError {
        FetchError::Unreachable {
            url: "https://example.com/home_sections".to_string(),
            reason: "network is unreachable".to_string(),
        }
    }

    /// Repository returning fixed sections; refresh takes a second and can be told to fail
    struct FakeHome {
        sections: Vec<ContentSection>,
        refreshed: Vec<ContentSection>,
        fail_refresh: bool,
        gets: AtomicUsize,
        refreshes: AtomicUsize,
    }

    impl FakeHome {
        fn new(sections: Vec<ContentSection>) -> Self {
            Self {
                sections,
                refreshed: vec![section("Refreshed")],
                fail_refresh: false,
                gets: AtomicUsize::new(0),
                refreshes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HomeRepository for FakeHome {
        fn get_home_sections(&self) -> BoxStream<'_, SectionsResult> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            stream::iter([
                LoadResult::Loading,
                LoadResult::Success(self.sections.clone()),
            ])
            .boxed()
        }

        async fn refresh_home_sections(&self) -> SectionsResult {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(1)).await;
            if self.fail_refresh {
                LoadResult::Error(Arc::new(offline()))
            } else {
                LoadResult::Success(self.refreshed.clone())
            }
        }
    }

    fn holder_for(
        repository: Arc<dyn HomeRepository>,
    ) -> (HomeStateHolder, EffectReceiver<HomeEffect>) {
        HomeStateHolder::new(
            GetHomeSections::new(repository.clone()),
            RefreshHomeSections::new(repository),
        )
    }

    async fn settled(holder: &HomeStateHolder) -> HomeState {
        holder
            .state()
            .wait_for(|s| !s.is_loading && !s.is_refreshing)
            .await
            .unwrap()
            .clone()
    }

    #[tokio::test(start_paused = true)]
    async fn construction_loads_sections() {
        let (holder, _effects) = holder_for(Arc::new(FakeHome::new(vec![section("Top")])));
        assert!(holder.current_state().is_loading);

        let state = settled(&holder).await;

        assert_eq!(state.sections, vec![section("Top")]);
        assert!(state.error_message.is_none());
        assert!(state.should_show_content());
        assert!(!state.should_show_empty_state());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_feed_shows_empty_state() {
        let (holder, _effects) = holder_for(Arc::new(FakeHome::new(vec![])));

        let state = settled(&holder).await;

        assert!(state.is_empty);
        assert!(state.should_show_empty_state());
        assert!(!state.should_show_content());
    }

    /// Data source that is always offline
    struct OfflineSource;

    #[async_trait]
    impl HomeDataSource for OfflineSource {
        async fn get_home_sections(&self) -> Result<HomeSectionsResponse, FetchError> {
            Err(offline())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn network_failure_reaches_state_and_effect_with_same_message() {
        let repository = Arc::new(CachingHomeRepository::new(OfflineSource));
        let (holder, mut effects) = holder_for(repository);

        let state = settled(&holder).await;
        let expected = offline().to_string();

        assert_eq!(state.error_message.as_deref(), Some(expected.as_str()));
        assert!(state.should_show_error_state());
        assert!(state.is_empty);
        assert_eq!(
            effects.recv().await,
            Some(HomeEffect::ShowErrorSnackbar {
                message: expected,
                action: Some("Retry".to_string()),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_replaces_sections_and_reports_success() {
        let (holder, mut effects) = holder_for(Arc::new(FakeHome::new(vec![section("Top")])));
        settled(&holder).await;

        holder.handle_intent(HomeIntent::Refresh);
        assert!(holder.current_state().is_refreshing);

        let state = settled(&holder).await;
        assert_eq!(state.sections, vec![section("Refreshed")]);
        assert_eq!(effects.recv().await, Some(HomeEffect::ShowRefreshSuccess));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_sections_and_sets_error() {
        let mut fake = FakeHome::new(vec![section("Top")]);
        fake.fail_refresh = true;
        let (holder, mut effects) = holder_for(Arc::new(fake));
        settled(&holder).await;

        holder.handle_intent(HomeIntent::Refresh);
        let state = settled(&holder).await;

        assert_eq!(state.sections, vec![section("Top")]);
        assert_eq!(state.error_message, Some(offline().to_string()));
        assert!(!state.should_show_content());
        assert!(matches!(
            effects.recv().await,
            Some(HomeEffect::ShowErrorSnackbar { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_while_refreshing_is_ignored() {
        let repository = Arc::new(FakeHome::new(vec![section("Top")]));
        let (holder, _effects) = holder_for(repository.clone());
        settled(&holder).await;

        holder.handle_intent(HomeIntent::Refresh);
        holder.handle_intent(HomeIntent::Refresh);
        settled(&holder).await;

        assert_eq!(repository.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_error_removes_message() {
        let repository = Arc::new(CachingHomeRepository::new(OfflineSource));
        let (holder, _effects) = holder_for(repository);
        settled(&holder).await;

        holder.handle_intent(HomeIntent::ClearError);

        assert!(holder.current_state().error_message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clicks_become_navigation_effects() {
        let (holder, mut effects) = holder_for(Arc::new(FakeHome::new(vec![])));

        holder.handle_intent(HomeIntent::SectionClicked("section1".to_string()));
        holder.handle_intent(HomeIntent::ItemClicked("item1".to_string()));

        assert_eq!(
            effects.recv().await,
            Some(HomeEffect::NavigateToSection("section1".to_string()))
        );
        assert_eq!(
            effects.recv().await,
            Some(HomeEffect::NavigateToContentDetail("item1".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retry_loads_again() {
        let repository = Arc::new(FakeHome::new(vec![section("Top")]));
        let (holder, _effects) = holder_for(repository.clone());
        let mut state = holder.state();
        state.wait_for(|s| !s.is_loading).await.unwrap();
        state.borrow_and_update();

        holder.handle_intent(HomeIntent::Retry);
        state.changed().await.unwrap();
        let state = settled(&holder).await;

        assert_eq!(repository.gets.load(Ordering::SeqCst), 2);
        assert_eq!(state.sections, vec![section("Top")]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_holder_stops_pending_refresh() {
        let (holder, mut effects) = holder_for(Arc::new(FakeHome::new(vec![section("Top")])));
        settled(&holder).await;

        holder.handle_intent(HomeIntent::Refresh);
        let state = holder.state();
        drop(holder);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(state.borrow().is_refreshing);
        assert_eq!(effects.recv().await, None);
    }
}
