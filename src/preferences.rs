// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::{PoisonError, RwLock};

use crate::config::Language;

/// Store for the user's language choice.
///
/// Only the composition root reads it; the selected language is then passed
/// explicitly to whatever needs it (for example the HTTP client headers).
pub trait LanguagePreferences: Send + Sync {
    fn selected_language(&self) -> Language;

    fn set_language(&self, language: Language);
}

/// Process-local preference store
#[derive(Debug, Default)]
pub struct InMemoryLanguagePreferences {
    language: RwLock<Language>,
}

impl InMemoryLanguagePreferences {
    pub fn new(initial: Language) -> Self {
        Self {
            language: RwLock::new(initial),
        }
    }
}

impl LanguagePreferences for InMemoryLanguagePreferences {
    fn selected_language(&self) -> Language {
        *self.language.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_language(&self, language: Language) {
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_english() {
        let prefs = InMemoryLanguagePreferences::default();
        assert_eq!(prefs.selected_language(), Language::English);
    }

    #[test]
    fn set_language_is_visible_to_readers() {
        let prefs = InMemoryLanguagePreferences::new(Language::English);
        prefs.set_language(Language::Arabic);
        assert_eq!(prefs.selected_language(), Language::Arabic);
    }
}
