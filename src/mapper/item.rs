// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dto::ContentItemDto;
use crate::model::{AudioArticle, AudioBook, ContentItem, Episode, ItemInfo, Podcast};

fn item_info(dto: &ContentItemDto) -> ItemInfo {
    ItemInfo {
        id: dto.id(),
        title: dto.title.clone().unwrap_or_default(),
        description: dto.description.clone(),
        image_url: dto.image_url.clone(),
        author: dto.author().map(String::from),
        duration: dto.duration.clone(),
        publish_date: dto.publish_date().map(String::from),
    }
}

/// Build a content item from a lower-cased type tag.
///
/// Unknown tags yield an article carrying only the common fields.
pub(crate) fn item_for_tag(tag: &str, dto: &ContentItemDto) -> ContentItem {
    let info = item_info(dto);

    match tag {
        "podcast" => ContentItem::Podcast(Podcast {
            info,
            episode_count: dto.episode_count,
            category: None,
        }),
        "episode" => ContentItem::Episode(Episode {
            info,
            podcast_id: dto.podcast_id.clone(),
            episode_number: dto.episode_number,
            audio_url: dto.audio_url.clone(),
        }),
        "audio_book" => ContentItem::AudioBook(AudioBook {
            narrator: info.author.clone(),
            info,
            chapters: None,
            language: dto.language.clone(),
        }),
        "audio_article" => ContentItem::AudioArticle(AudioArticle {
            info,
            article_url: dto.article_url.clone(),
            read_by: dto.read_by.clone(),
            category: None,
        }),
        _ => ContentItem::AudioArticle(AudioArticle {
            info,
            article_url: None,
            read_by: None,
            category: None,
        }),
    }
}
