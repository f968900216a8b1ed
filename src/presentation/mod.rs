// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-screen state holders: intents in, view state and one-shot effects out

mod home;
mod search;
mod store;

pub use home::{HomeEffect, HomeIntent, HomeState, HomeStateHolder};
pub use search::{
    DEFAULT_DEBOUNCE, SearchEffect, SearchIntent, SearchOptions, SearchState, SearchStateHolder,
};
pub use store::{EffectReceiver, Store, TaskScope, TaskSlot};
