// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use crate::error::FetchError;

/// Outcome of a load as it travels from repository to view state.
///
/// `Loading` is always followed by either `Success` or `Error`. The error is
/// shared so a result can sit in a cache and be replayed.
#[derive(Debug, Clone)]
pub enum LoadResult<T> {
    Loading,
    Success(T),
    Error(Arc<FetchError>),
}

impl<T> LoadResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadResult::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoadResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadResult::Error(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            LoadResult::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadResult::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadResult<U> {
        match self {
            LoadResult::Loading => LoadResult::Loading,
            LoadResult::Success(data) => LoadResult::Success(f(data)),
            LoadResult::Error(e) => LoadResult::Error(e),
        }
    }
}

impl<T> From<Result<T, FetchError>> for LoadResult<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => LoadResult::Success(data),
            Err(e) => LoadResult::Error(Arc::new(e)),
        }
    }
}
