// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use url::Url;

use crate::dto::HomeSectionsResponse;
use crate::error::FetchError;
use crate::http::HttpClient;

use super::fetch::fetch_json;

/// Where home feed payloads come from
#[async_trait]
pub trait HomeDataSource: Send + Sync {
    async fn get_home_sections(&self) -> Result<HomeSectionsResponse, FetchError>;
}

/// Home feed served over HTTP
pub struct NetworkHomeDataSource<C> {
    client: C,
    endpoint: Url,
}

impl<C: HttpClient> NetworkHomeDataSource<C> {
    pub fn new(client: C, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl<C: HttpClient> HomeDataSource for NetworkHomeDataSource<C> {
    async fn get_home_sections(&self) -> Result<HomeSectionsResponse, FetchError> {
        fetch_json(&self.client, &self.endpoint).await
    }
}
