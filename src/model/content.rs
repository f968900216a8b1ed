// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

/// Fields every kind of content carries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemInfo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    /// Length in seconds, kept as sent
    pub duration: Option<String>,
    pub publish_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Podcast {
    #[serde(flatten)]
    pub info: ItemInfo,
    pub episode_count: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    #[serde(flatten)]
    pub info: ItemInfo,
    pub podcast_id: Option<String>,
    pub episode_number: Option<i64>,
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioBook {
    #[serde(flatten)]
    pub info: ItemInfo,
    pub narrator: Option<String>,
    pub chapters: Option<i64>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArticle {
    #[serde(flatten)]
    pub info: ItemInfo,
    pub article_url: Option<String>,
    pub read_by: Option<String>,
    pub category: Option<String>,
}

/// The kind of a [`ContentItem`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Podcast,
    Episode,
    AudioBook,
    AudioArticle,
}

/// A piece of playable content shown in a section or a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Podcast(Podcast),
    Episode(Episode),
    AudioBook(AudioBook),
    AudioArticle(AudioArticle),
}

impl ContentItem {
    /// Common fields of whichever variant this is
    pub fn info(&self) -> &ItemInfo {
        match self {
            ContentItem::Podcast(p) => &p.info,
            ContentItem::Episode(e) => &e.info,
            ContentItem::AudioBook(b) => &b.info,
            ContentItem::AudioArticle(a) => &a.info,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Podcast(_) => ContentKind::Podcast,
            ContentItem::Episode(_) => ContentKind::Episode,
            ContentItem::AudioBook(_) => ContentKind::AudioBook,
            ContentItem::AudioArticle(_) => ContentKind::AudioArticle,
        }
    }

    pub fn id(&self) -> &str {
        &self.info().id
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn description(&self) -> Option<&str> {
        self.info().description.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.info().image_url.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.info().author.as_deref()
    }

    pub fn duration(&self) -> Option<&str> {
        self.info().duration.as_deref()
    }

    pub fn publish_date(&self) -> Option<&str> {
        self.info().publish_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> ItemInfo {
        ItemInfo {
            id: id.to_string(),
            title: format!("Title {id}"),
            author: Some("Author".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn accessors_reach_common_fields_of_every_variant() {
        let items = [
            ContentItem::Podcast(Podcast {
                info: info("p"),
                episode_count: Some(3),
                category: None,
            }),
            ContentItem::Episode(Episode {
                info: info("e"),
                podcast_id: None,
                episode_number: Some(1),
                audio_url: None,
            }),
            ContentItem::AudioBook(AudioBook {
                info: info("b"),
                narrator: None,
                chapters: None,
                language: None,
            }),
            ContentItem::AudioArticle(AudioArticle {
                info: info("a"),
                article_url: None,
                read_by: None,
                category: None,
            }),
        ];

        let ids: Vec<_> = items.iter().map(ContentItem::id).collect();
        assert_eq!(ids, ["p", "e", "b", "a"]);
        assert!(items.iter().all(|item| item.author() == Some("Author")));

        let kinds: Vec<_> = items.iter().map(ContentItem::kind).collect();
        assert_eq!(
            kinds,
            [
                ContentKind::Podcast,
                ContentKind::Episode,
                ContentKind::AudioBook,
                ContentKind::AudioArticle
            ]
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let item = ContentItem::Podcast(Podcast {
            info: info("42"),
            episode_count: None,
            category: None,
        });

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "podcast");
        assert_eq!(json["id"], "42");
    }
}
