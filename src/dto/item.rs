// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Which identifier field an item payload carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Podcast,
    Episode,
    AudioBook,
    AudioArticle,
}

impl IdentifierKind {
    /// Type tag as the API spells it
    pub fn tag(self) -> &'static str {
        match self {
            IdentifierKind::Podcast => "podcast",
            IdentifierKind::Episode => "episode",
            IdentifierKind::AudioBook => "audio_book",
            IdentifierKind::AudioArticle => "audio_article",
        }
    }
}

/// A single content entry as sent by either endpoint.
///
/// All kinds of content share this envelope, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItemDto {
    #[serde(default)]
    pub podcast_id: Option<String>,
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub audiobook_id: Option<String>,
    #[serde(default)]
    pub article_id: Option<String>,

    #[serde(default, rename = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "avatar_url")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub episode_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub priority: Option<i64>,
    #[serde(
        default,
        rename = "popularityScore",
        deserialize_with = "lenient::int"
    )]
    pub popularity_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub season_number: Option<i64>,
    #[serde(default)]
    pub episode_type: Option<String>,
    #[serde(default)]
    pub podcast_name: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, rename = "number", deserialize_with = "lenient::int")]
    pub episode_number: Option<i64>,
    #[serde(default)]
    pub separated_audio_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub article_url: Option<String>,
    #[serde(default)]
    pub read_by: Option<String>,
}

impl ContentItemDto {
    /// The first populated identifier, by precedence podcast > episode > audiobook > article
    pub fn identifier_kind(&self) -> Option<IdentifierKind> {
        if self.podcast_id.is_some() {
            Some(IdentifierKind::Podcast)
        } else if self.episode_id.is_some() {
            Some(IdentifierKind::Episode)
        } else if self.audiobook_id.is_some() {
            Some(IdentifierKind::AudioBook)
        } else if self.article_id.is_some() {
            Some(IdentifierKind::AudioArticle)
        } else {
            None
        }
    }

    /// Identifier value matching [`identifier_kind`](Self::identifier_kind), or empty
    pub fn id(&self) -> String {
        self.podcast_id
            .as_ref()
            .or(self.episode_id.as_ref())
            .or(self.audiobook_id.as_ref())
            .or(self.article_id.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    pub fn author(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    pub fn publish_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_precedence_prefers_podcast() {
        let dto = ContentItemDto {
            episode_id: Some("ep".to_string()),
            podcast_id: Some("pod".to_string()),
            ..Default::default()
        };

        assert_eq!(dto.identifier_kind(), Some(IdentifierKind::Podcast));
        assert_eq!(dto.id(), "pod");
    }

    #[test]
    fn missing_identifiers_yield_empty_id() {
        let dto = ContentItemDto::default();
        assert_eq!(dto.identifier_kind(), None);
        assert_eq!(dto.id(), "");
    }

    #[test]
    fn decodes_loosely_typed_payload() {
        let dto: ContentItemDto = serde_json::from_str(
            r#"{
                "episode_id": "e-1",
                "name": "Episode One",
                "duration": "1800",
                "number": "12",
                "popularityScore": 9,
                "score": "81.5",
                "author_name": "Host",
                "release_date": "2024-01-01T00:00:00Z",
                "unexpected": {"ignored": true}
            }"#,
        )
        .unwrap();

        assert_eq!(dto.identifier_kind(), Some(IdentifierKind::Episode));
        assert_eq!(dto.title.as_deref(), Some("Episode One"));
        assert_eq!(dto.duration.as_deref(), Some("1800"));
        assert_eq!(dto.episode_number, Some(12));
        assert_eq!(dto.popularity_score, Some(9));
        assert_eq!(dto.score, Some(81.5));
        assert_eq!(dto.author(), Some("Host"));
        assert_eq!(dto.publish_date(), Some("2024-01-01T00:00:00Z"));
    }
}
