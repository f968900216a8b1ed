// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::debug;

use crate::model::{LoadResult, SearchQuery, SearchResult};
use crate::repository::{HomeRepository, SearchOutcome, SearchRepository, SectionsResult};

/// Load the home feed, served from cache after the first fetch
#[derive(Clone)]
pub struct GetHomeSections {
    repository: Arc<dyn HomeRepository>,
}

impl GetHomeSections {
    pub fn new(repository: Arc<dyn HomeRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> BoxStream<'_, SectionsResult> {
        self.repository.get_home_sections()
    }
}

/// Fetch the home feed again, bypassing the cache
#[derive(Clone)]
pub struct RefreshHomeSections {
    repository: Arc<dyn HomeRepository>,
}

impl RefreshHomeSections {
    pub fn new(repository: Arc<dyn HomeRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> SectionsResult {
        self.repository.refresh_home_sections().await
    }
}

/// Search content; blank queries resolve to an empty result without a request
#[derive(Clone)]
pub struct SearchContent {
    repository: Arc<dyn SearchRepository>,
}

impl SearchContent {
    pub fn new(repository: Arc<dyn SearchRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, query: SearchQuery) -> BoxStream<'_, SearchOutcome> {
        if query.is_blank() {
            debug!("blank query, skipping search");
            return stream::once(future::ready(LoadResult::Success(SearchResult::empty(
                query.text,
            ))))
            .boxed();
        }

        self.repository.search(&query)
    }
}
