// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod config;
pub mod dto;
pub mod error;
pub mod http;
pub mod mapper;
pub mod model;
pub mod preferences;
pub mod presentation;
pub mod repository;
pub mod source;
pub mod usecase;

// Re-export main types for convenience
pub use config::{ClientConfig, Language};
pub use error::{ConfigError, FetchError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use model::{
    ContentItem, ContentKind, ContentSection, LoadResult, SearchQuery, SearchResult,
    SectionLayout, SectionType, UserFacingError, display_error_message,
};
pub use preferences::{InMemoryLanguagePreferences, LanguagePreferences};
pub use presentation::{
    HomeEffect, HomeIntent, HomeState, HomeStateHolder, SearchEffect, SearchIntent,
    SearchOptions, SearchState, SearchStateHolder,
};
pub use repository::{CachingHomeRepository, HomeRepository, LiveSearchRepository, SearchRepository};
pub use source::{NetworkHomeDataSource, NetworkSearchDataSource};
pub use usecase::{GetHomeSections, RefreshHomeSections, SearchContent};
