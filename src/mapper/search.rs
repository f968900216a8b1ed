// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dto::{ContentItemDto, IdentifierKind, SearchFiltersDto, SearchRequest, SearchResponse};
use crate::model::{ContentItem, SearchFilters, SearchQuery, SearchResult, SectionType};

use super::item::item_for_tag;

/// Flatten every search section into one result list.
///
/// Unlike the home feed, the variant comes only from the identifier an item
/// carries; the section's declared type is ignored and items without any
/// identifier are treated as podcasts.
pub fn map_search_response(dto: &SearchResponse) -> SearchResult {
    let results: Vec<ContentItem> = dto
        .sections
        .iter()
        .flat_map(|section| section.content.iter())
        .map(map_search_item)
        .collect();

    SearchResult {
        query: None,
        total_count: results.len(),
        results,
        has_more: false,
    }
}

fn map_search_item(dto: &ContentItemDto) -> ContentItem {
    let kind = dto.identifier_kind().unwrap_or(IdentifierKind::Podcast);
    item_for_tag(kind.tag(), dto)
}

/// Build the request parameters for a query
pub fn map_search_query(query: &SearchQuery) -> SearchRequest {
    SearchRequest {
        filters: query.filters.as_ref().map(map_search_filters),
        ..SearchRequest::new(query.text.clone())
    }
}

fn map_search_filters(filters: &SearchFilters) -> SearchFiltersDto {
    SearchFiltersDto {
        content_types: filters
            .content_types
            .as_ref()
            .map(|types| types.iter().copied().map(section_type_param).map(String::from).collect()),
        authors: filters.authors.clone(),
        categories: filters.categories.clone(),
        min_duration: filters.min_duration,
        max_duration: filters.max_duration,
    }
}

fn section_type_param(section_type: SectionType) -> &'static str {
    match section_type {
        SectionType::Podcasts => "podcasts",
        SectionType::Episodes => "episodes",
        SectionType::Audiobooks => "audiobooks",
        SectionType::AudioArticles => "audio_articles",
        SectionType::Mixed => "mixed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dto::SearchSectionDto;

    fn section(content_type: &str, content: Vec<ContentItemDto>) -> SearchSectionDto {
        SearchSectionDto {
            name: "Results".to_string(),
            layout: "square".to_string(),
            content_type: content_type.to_string(),
            order: Some(1),
            content,
        }
    }

    #[test]
    fn flattens_sections_into_one_list() {
        let response = SearchResponse {
            sections: vec![
                section(
                    "podcast",
                    vec![ContentItemDto {
                        podcast_id: Some("p1".into()),
                        ..Default::default()
                    }],
                ),
                section(
                    "episode",
                    vec![
                        ContentItemDto {
                            episode_id: Some("e1".into()),
                            ..Default::default()
                        },
                        ContentItemDto {
                            article_id: Some("a1".into()),
                            ..Default::default()
                        },
                    ],
                ),
            ],
        };

        let result = map_search_response(&response);

        assert_eq!(result.total_count, 3);
        assert!(!result.has_more);
        let ids: Vec<_> = result.results.iter().map(ContentItem::id).collect();
        assert_eq!(ids, ["p1", "e1", "a1"]);
        assert!(matches!(result.results[2], ContentItem::AudioArticle(_)));
    }

    #[test]
    fn identifier_overrides_declared_section_type() {
        let response = SearchResponse {
            sections: vec![section(
                "audio_book",
                vec![ContentItemDto {
                    episode_id: Some("e1".into()),
                    ..Default::default()
                }],
            )],
        };

        let result = map_search_response(&response);
        assert!(matches!(result.results[0], ContentItem::Episode(_)));
    }

    #[test]
    fn identifier_precedence_follows_podcast_first() {
        let dto = ContentItemDto {
            audiobook_id: Some("b1".into()),
            episode_id: Some("e1".into()),
            ..Default::default()
        };

        let item = map_search_item(&dto);
        assert!(matches!(item, ContentItem::Episode(_)));
        assert_eq!(item.id(), "e1");
    }

    #[test]
    fn item_without_identifier_defaults_to_podcast() {
        let item = map_search_item(&ContentItemDto::default());
        assert!(matches!(item, ContentItem::Podcast(_)));
        assert_eq!(item.id(), "");
    }

    #[test]
    fn string_episode_count_is_parsed() {
        let dto: ContentItemDto =
            serde_json::from_str(r#"{"podcast_id": "p", "episode_count": "57"}"#).unwrap();

        match map_search_item(&dto) {
            ContentItem::Podcast(podcast) => assert_eq!(podcast.episode_count, Some(57)),
            other => panic!("expected podcast, got {other:?}"),
        }
    }

    #[test]
    fn query_maps_to_first_page_request_with_filters() {
        let query = SearchQuery {
            text: "history".to_string(),
            filters: Some(SearchFilters {
                content_types: Some(vec![SectionType::Podcasts, SectionType::AudioArticles]),
                min_duration: Some(60),
                ..Default::default()
            }),
        };

        let request = map_search_query(&query);

        assert_eq!(request.query, "history");
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 20);
        let filters = request.filters.unwrap();
        assert_eq!(
            filters.content_types,
            Some(vec!["podcasts".to_string(), "audio_articles".to_string()])
        );
        assert_eq!(filters.min_duration, Some(60));
        assert_eq!(filters.authors, None);
    }
}
