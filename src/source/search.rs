// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use url::Url;

use crate::dto::{SearchRequest, SearchResponse};
use crate::error::FetchError;
use crate::http::HttpClient;

use super::fetch::fetch_json;

/// Where search payloads come from
#[async_trait]
pub trait SearchDataSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FetchError>;
}

/// Search served over HTTP.
///
/// The request parameters are sent as query string pairs; the current
/// backend answers with the same payload regardless.
pub struct NetworkSearchDataSource<C> {
    client: C,
    endpoint: Url,
}

impl<C: HttpClient> NetworkSearchDataSource<C> {
    pub fn new(client: C, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &request.query)
            .append_pair("page", &request.page.to_string())
            .append_pair("limit", &request.limit.to_string());
        url
    }
}

#[async_trait]
impl<C: HttpClient> SearchDataSource for NetworkSearchDataSource<C> {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FetchError> {
        fetch_json(&self.client, &self.request_url(request)).await
    }
}
