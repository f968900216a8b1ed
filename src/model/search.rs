// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use super::content::ContentItem;
use super::section::SectionType;

/// Flattened results of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub query: Option<String>,
    pub results: Vec<ContentItem>,
    pub total_count: usize,
    /// Pagination is not offered by the backend, so this stays false
    pub has_more: bool,
}

impl SearchResult {
    /// A result with no items for the given query
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub filters: Option<SearchFilters>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filters: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub content_types: Option<Vec<SectionType>>,
    pub authors: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub min_duration: Option<i64>,
    pub max_duration: Option<i64>,
}
