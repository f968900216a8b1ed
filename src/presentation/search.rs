// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tracing::debug;

use crate::model::{ContentItem, LoadResult, SearchQuery};
use crate::usecase::SearchContent;

use super::store::{EffectReceiver, Store, TaskScope, TaskSlot, failure_message, retry_action};

const SEARCH_FAILED: &str = "Search failed";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    UpdateQuery(String),
    SuggestionClicked(String),
    ResultClicked(ContentItem),
    ClearSearch,
    ClearError,
    ToggleSuggestions,
    LoadMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    NavigateToContentDetail(ContentItem),
    ShowErrorSnackbar {
        message: String,
        action: Option<String>,
    },
    HideKeyboard,
    ScrollToTop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub current_query: String,
    pub search_results: Vec<ContentItem>,
    pub suggestions: Vec<String>,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error_message: Option<String>,
    pub show_suggestions: bool,
    pub has_searched: bool,
}

impl SearchState {
    fn initial(suggestions: Vec<String>) -> Self {
        Self {
            suggestions,
            ..Default::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn should_show_results(&self) -> bool {
        !self.search_results.is_empty() && !self.has_error()
    }

    pub fn should_show_empty_results(&self) -> bool {
        self.search_results.is_empty() && self.has_searched && !self.is_loading && !self.has_error()
    }

    pub fn should_show_suggestions(&self) -> bool {
        self.show_suggestions && !self.suggestions.is_empty()
    }

    pub fn can_load_more(&self) -> bool {
        !self.is_loading && !self.is_loading_more
    }
}

/// Tuning for a [`SearchStateHolder`]
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Quiet period after the last keystroke before a search starts
    pub debounce: Duration,
    /// Offered while the user is typing
    pub suggestions: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            suggestions: Vec::new(),
        }
    }
}

/// Starts searches, keeping at most one in flight
#[derive(Clone)]
struct SearchRunner {
    store: Arc<Store<SearchState, SearchEffect>>,
    use_case: SearchContent,
    slot: Arc<TaskSlot>,
}

impl SearchRunner {
    /// Start a search for `text` unless the query has moved on since it was scheduled
    fn run(&self, text: String) -> bool {
        let store = Arc::clone(&self.store);
        let use_case = self.use_case.clone();
        let query = SearchQuery::new(text.clone());

        let task = async move {
            let mut outcomes = use_case.execute(query);

            while let Some(outcome) = outcomes.next().await {
                match outcome {
                    LoadResult::Loading => {}
                    LoadResult::Success(result) => store.set_state(move |s| SearchState {
                        search_results: result.results,
                        is_loading: false,
                        error_message: None,
                        show_suggestions: false,
                        ..s.clone()
                    }),
                    LoadResult::Error(error) => {
                        let message = failure_message(&error, SEARCH_FAILED);
                        store.set_state(|s| SearchState {
                            is_loading: false,
                            error_message: Some(message.clone()),
                            ..s.clone()
                        });
                        store.send_effect(SearchEffect::ShowErrorSnackbar {
                            message,
                            action: retry_action(&error),
                        });
                    }
                }
            }
        };

        // Checked under the slot lock so a concurrent clear either sees this
        // search and aborts it, or this check sees the cleared query
        let started = self.slot.replace_if(
            || {
                self.store.update_if(|s| {
                    (s.current_query == text).then(|| SearchState {
                        is_loading: true,
                        is_loading_more: false,
                        error_message: None,
                        show_suggestions: false,
                        has_searched: true,
                        ..s.clone()
                    })
                })
            },
            task,
        );

        if started {
            debug!(query = %text, "search started");
        } else {
            debug!(query = %text, "query changed before search started, skipping");
        }
        started
    }

    fn cancel(&self) {
        self.slot.cancel();
    }
}

/// Turns query edits into searches once typing pauses.
///
/// Blank input drops whatever is pending and forgets the last searched
/// text, so typing the same query again searches again.
async fn debounce_queries(
    mut queries: watch::Receiver<String>,
    debounce: Duration,
    runner: SearchRunner,
) {
    let mut pending: Option<String> = None;
    let mut last_searched: Option<String> = None;

    loop {
        tokio::select! {
            changed = queries.changed() => {
                if changed.is_err() {
                    break;
                }
                let text = queries.borrow_and_update().clone();
                if text.trim().is_empty() {
                    pending = None;
                    last_searched = None;
                } else {
                    pending = Some(text);
                }
            }
            _ = tokio::time::sleep(debounce), if pending.is_some() => {
                if let Some(text) = pending.take() {
                    if last_searched.as_deref() == Some(text.as_str()) {
                        debug!(query = %text, "query unchanged, not searching again");
                    } else if runner.run(text.clone()) {
                        last_searched = Some(text);
                    }
                }
            }
        }
    }
}

/// State holder behind the search screen.
///
/// Dropping the holder stops the debounce loop and any search in flight.
pub struct SearchStateHolder {
    store: Arc<Store<SearchState, SearchEffect>>,
    queries: watch::Sender<String>,
    runner: SearchRunner,
    _scope: TaskScope,
}

impl SearchStateHolder {
    /// Must be called from within a tokio runtime
    pub fn new(
        use_case: SearchContent,
        options: SearchOptions,
    ) -> (Self, EffectReceiver<SearchEffect>) {
        let (store, effects) = Store::new(SearchState::initial(options.suggestions));
        let store = Arc::new(store);
        let runner = SearchRunner {
            store: Arc::clone(&store),
            use_case,
            slot: Arc::new(TaskSlot::default()),
        };

        let (queries, query_updates) = watch::channel(String::new());
        let scope = TaskScope::default();
        scope.spawn(debounce_queries(
            query_updates,
            options.debounce,
            runner.clone(),
        ));

        let holder = Self {
            store,
            queries,
            runner,
            _scope: scope,
        };
        (holder, effects)
    }

    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.store.subscribe()
    }

    pub fn current_state(&self) -> SearchState {
        self.store.current()
    }

    pub fn handle_intent(&self, intent: SearchIntent) {
        debug!(?intent, "search intent");

        match intent {
            SearchIntent::UpdateQuery(text) => self.update_query(text),
            SearchIntent::SuggestionClicked(text) => {
                self.store.set_state(|s| SearchState {
                    current_query: text.clone(),
                    show_suggestions: false,
                    ..s.clone()
                });
                self.queries.send_replace(text);
                self.store.send_effect(SearchEffect::HideKeyboard);
            }
            SearchIntent::ResultClicked(item) => {
                self.store
                    .send_effect(SearchEffect::NavigateToContentDetail(item));
            }
            SearchIntent::ClearSearch => {
                self.store
                    .set_state(|s| SearchState::initial(s.suggestions.clone()));
                self.runner.cancel();
                self.queries.send_replace(String::new());
            }
            SearchIntent::ClearError => self.store.set_state(|s| SearchState {
                error_message: None,
                ..s.clone()
            }),
            SearchIntent::ToggleSuggestions => self.store.set_state(|s| SearchState {
                show_suggestions: !s.show_suggestions,
                ..s.clone()
            }),
            SearchIntent::LoadMore => {
                let started = self.store.update_if(|s| {
                    s.can_load_more().then(|| SearchState {
                        is_loading_more: true,
                        ..s.clone()
                    })
                });
                if started {
                    self.store.send_effect(SearchEffect::ScrollToTop);
                }
            }
        }
    }

    fn update_query(&self, text: String) {
        let blank = text.trim().is_empty();

        self.store.set_state(|s| {
            let mut next = SearchState {
                current_query: text.clone(),
                show_suggestions: !blank && !s.suggestions.is_empty(),
                has_searched: false,
                ..s.clone()
            };
            if blank {
                next.search_results.clear();
                next.is_loading = false;
                next.is_loading_more = false;
                next.error_message = None;
            }
            next
        });

        // State first: a search racing this clear then finds the query changed
        if blank {
            self.runner.cancel();
        }
        self.queries.send_replace(text);
    }
}

impl Drop for SearchStateHolder {
    fn drop(&mut self) {
        self.runner.cancel();
    }
}
