// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;
use crate::http::HttpClient;

/// GET a URL and decode its JSON body
pub async fn fetch_json<C, T>(client: &C, url: &Url) -> Result<T, FetchError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    debug!(%url, "requesting");
    let response = client.get(url).await?;

    if response.status >= 400 {
        warn!(%url, status = response.status, "server returned an error status");
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    debug!(%url, bytes = response.body.len(), "response received");
    serde_json::from_slice(&response.body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })
}
