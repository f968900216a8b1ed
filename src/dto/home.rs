// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use super::item::ContentItemDto;
use super::lenient;

/// Envelope returned by `GET home_sections`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeSectionsResponse {
    #[serde(default)]
    pub sections: Vec<HomeSectionDto>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total_pages: Option<i64>,
}

/// One section of the home feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeSectionDto {
    #[serde(default, rename = "name")]
    pub title: String,
    /// Layout hint, e.g. `square` or `2_lines_grid`
    #[serde(default, rename = "type")]
    pub layout: String,
    /// Declared section content type, e.g. `podcast` or `mixed`
    #[serde(default, rename = "content_type")]
    pub section_type: String,
    #[serde(default, rename = "content")]
    pub items: Vec<ContentItemDto>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub order: Option<i64>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page_url: Option<String>,
}
