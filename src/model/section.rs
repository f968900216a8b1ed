// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use super::content::ContentItem;

/// What a section declares it contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Podcasts,
    Episodes,
    Audiobooks,
    AudioArticles,
    Mixed,
}

/// Rendering hint for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLayout {
    BinaryGrid,
    SquareGrid,
    HorizontalList,
    VerticalList,
    LargeCards,
    Queue,
}

/// A titled, ordered group of content on the home feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSection {
    /// `"{title}_{order}"`
    pub id: String,
    pub title: String,
    pub section_type: SectionType,
    pub layout: SectionLayout,
    pub items: Vec<ContentItem>,
    pub order: i64,
    pub has_more: bool,
    pub next_page_url: Option<String>,
}

impl ContentSection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build a section id from its title and sort key
pub fn section_id(title: &str, order: i64) -> String {
    format!("{title}_{order}")
}

/// Sort sections by their `order` key, keeping input order for ties
pub fn sort_sections(sections: &mut [ContentSection]) {
    sections.sort_by_key(|section| section.order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, order: i64) -> ContentSection {
        ContentSection {
            id: section_id(title, order),
            title: title.to_string(),
            section_type: SectionType::Mixed,
            layout: SectionLayout::Queue,
            items: vec![],
            order,
            has_more: false,
            next_page_url: None,
        }
    }

    #[test]
    fn id_joins_title_and_order() {
        assert_eq!(section_id("Top Podcasts", 1), "Top Podcasts_1");
        assert_eq!(section_id("", -3), "_-3");
    }

    #[test]
    fn sort_is_stable_for_equal_order() {
        let mut sections = vec![section("B", 2), section("A", 1), section("C", 2)];

        sort_sections(&mut sections);

        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }
}
