// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration
//!
//! Everything the composition root needs to wire the content client:
//! endpoint base URLs, the transport timeout, the search debounce window
//! and the preferred content language. The core mapping and repository
//! code never reads this directly; values are handed down explicitly.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

const DEFAULT_HOME_BASE_URL: &str = "https://api-v2-b2sit6oh3a-uc.a.run.app/";
const DEFAULT_SEARCH_BASE_URL: &str = "https://mock.apidog.com/m1/735111-711675-default/";
const HOME_SECTIONS_PATH: &str = "home_sections";
const SEARCH_PATH: &str = "search";

/// Content language offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Name of the language in English
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        }
    }

    /// Name of the language in the language itself
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "العربية",
        }
    }

    /// Whether text in this language runs right to left
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Arabic)
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Settings for the content client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL serving `home_sections`
    pub home_base_url: String,
    /// Base URL serving `search`
    pub search_base_url: String,
    /// Transport timeout applied to every request
    pub timeout_secs: u64,
    /// Quiet period before a typed query triggers a search
    pub search_debounce_ms: u64,
    /// Preferred content language
    pub language: Language,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            home_base_url: DEFAULT_HOME_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            timeout_secs: 30,
            search_debounce_ms: 200,
            language: Language::English,
        }
    }
}

impl ClientConfig {
    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that both base URLs parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base(&self.home_base_url)?;
        parse_base(&self.search_base_url)?;
        Ok(())
    }

    pub fn home_sections_url(&self) -> Result<Url, ConfigError> {
        join_endpoint(&self.home_base_url, HOME_SECTIONS_PATH)
    }

    pub fn search_url(&self) -> Result<Url, ConfigError> {
        join_endpoint(&self.search_base_url, SEARCH_PATH)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Parse a base URL, making sure it ends in `/` so joins append rather than replace
fn parse_base(value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };

    Url::parse(&normalized).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        source: e,
    })
}

fn join_endpoint(base: &str, path: &str) -> Result<Url, ConfigError> {
    parse_base(base)?
        .join(path)
        .map_err(|e| ConfigError::InvalidUrl {
            value: format!("{base}{path}"),
            source: e,
        })
}
