// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::dto::{ContentItemDto, HomeSectionDto, HomeSectionsResponse, IdentifierKind};
use crate::model::{ContentItem, ContentSection, SectionLayout, SectionType, section_id};

use super::item::item_for_tag;

const UNKNOWN_TAG: &str = "unknown";

/// Map the home feed envelope into sections, in response order
pub fn map_home_sections_response(dto: &HomeSectionsResponse) -> Vec<ContentSection> {
    dto.sections.iter().map(map_section).collect()
}

fn map_section(dto: &HomeSectionDto) -> ContentSection {
    let order = dto.order.unwrap_or_default();

    ContentSection {
        id: section_id(&dto.title, order),
        title: dto.title.clone(),
        section_type: map_section_type(&dto.section_type),
        layout: map_section_layout(&dto.layout),
        items: dto.items.iter().map(map_home_item).collect(),
        order,
        has_more: dto.has_more,
        next_page_url: dto.next_page_url.clone(),
    }
}

/// The home feed derives the variant from whichever identifier the item carries
fn map_home_item(dto: &ContentItemDto) -> ContentItem {
    let tag = dto.identifier_kind().map_or(UNKNOWN_TAG, IdentifierKind::tag);
    item_for_tag(tag, dto)
}

pub fn map_section_type(value: &str) -> SectionType {
    match value.trim().to_lowercase().as_str() {
        "podcast" => SectionType::Podcasts,
        "episode" => SectionType::Episodes,
        "audio_book" => SectionType::Audiobooks,
        "audio_article" => SectionType::AudioArticles,
        _ => SectionType::Mixed,
    }
}

pub fn map_section_layout(value: &str) -> SectionLayout {
    match value.trim().to_lowercase().as_str() {
        "binary_grid" | "2_lines_grid" => SectionLayout::BinaryGrid,
        "square_grid" | "square" => SectionLayout::SquareGrid,
        "horizontal_list" => SectionLayout::HorizontalList,
        "vertical_list" => SectionLayout::VerticalList,
        "large_cards" | "big_square" => SectionLayout::LargeCards,
        "queue" => SectionLayout::Queue,
        _ => SectionLayout::BinaryGrid,
    }
}
