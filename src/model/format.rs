// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Human-readable renderings of the domain model

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::Language;

use super::content::{AudioBook, ContentItem, ContentKind, Episode, Podcast};
use super::section::{ContentSection, SectionLayout, SectionType};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.3fZ"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn plural(count: i64, none: &str, singular: &str, many: &str) -> String {
    match count {
        0 => none.to_string(),
        1 => format!("1 {singular}"),
        n => format!("{n} {many}"),
    }
}

impl ContentItem {
    pub fn display_title(&self) -> &str {
        non_blank(Some(self.title())).unwrap_or("Untitled")
    }

    pub fn display_author(&self) -> Option<&str> {
        non_blank(self.author())
    }

    pub fn display_description(&self) -> Option<&str> {
        non_blank(self.description())
    }

    /// Duration as `h:mm:ss`, `m:ss` or `Ns`; non-numeric values pass through
    pub fn formatted_duration(&self) -> Option<String> {
        self.duration().map(format_duration)
    }

    pub fn formatted_publish_date(&self, now: DateTime<Utc>) -> Option<String> {
        self.publish_date().map(|date| format_publish_date(date, now))
    }
}

impl ContentKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ContentKind::Podcast => "Podcast",
            ContentKind::Episode => "Episode",
            ContentKind::AudioBook => "Audio Book",
            ContentKind::AudioArticle => "Audio Article",
        }
    }

    /// The section type a lone item of this kind belongs to
    pub fn section_type(self) -> SectionType {
        match self {
            ContentKind::Podcast => SectionType::Podcasts,
            ContentKind::Episode => SectionType::Episodes,
            ContentKind::AudioBook => SectionType::Audiobooks,
            ContentKind::AudioArticle => SectionType::AudioArticles,
        }
    }
}

impl Podcast {
    pub fn formatted_episode_count(&self) -> Option<String> {
        self.episode_count
            .map(|n| plural(n, "No episodes", "episode", "episodes"))
    }
}

impl Episode {
    pub fn formatted_episode_number(&self) -> Option<String> {
        self.episode_number.map(|n| format!("Episode {n}"))
    }
}

impl AudioBook {
    pub fn formatted_chapter_count(&self) -> Option<String> {
        self.chapters
            .map(|n| plural(n, "No chapters", "chapter", "chapters"))
    }

    /// Language name for the book's language tag; unrecognised tags are shown as sent
    pub fn display_language(&self) -> Option<String> {
        let tag = non_blank(self.language.as_deref())?;
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);

        Some(match primary.parse::<Language>() {
            Ok(language) => language.display_name().to_string(),
            Err(_) => tag.to_string(),
        })
    }
}

impl SectionType {
    pub fn display_name(self) -> &'static str {
        match self {
            SectionType::Podcasts => "Podcasts",
            SectionType::Episodes => "Episodes",
            SectionType::Audiobooks => "Audio Books",
            SectionType::AudioArticles => "Audio Articles",
            SectionType::Mixed => "Mixed Content",
        }
    }
}

impl SectionLayout {
    pub fn display_name(self) -> &'static str {
        match self {
            SectionLayout::BinaryGrid => "Grid View",
            SectionLayout::SquareGrid => "Square Grid",
            SectionLayout::HorizontalList => "Horizontal List",
            SectionLayout::VerticalList => "Vertical List",
            SectionLayout::LargeCards => "Large Cards",
            SectionLayout::Queue => "Queue List",
        }
    }

    pub fn column_count(self) -> usize {
        match self {
            SectionLayout::BinaryGrid => 2,
            SectionLayout::SquareGrid => 3,
            SectionLayout::HorizontalList
            | SectionLayout::VerticalList
            | SectionLayout::LargeCards
            | SectionLayout::Queue => 1,
        }
    }
}

impl ContentSection {
    pub fn display_title(&self) -> &str {
        non_blank(Some(&self.title)).unwrap_or("Untitled Section")
    }

    pub fn item_count_text(&self) -> String {
        plural(self.items.len() as i64, "No items", "item", "items")
    }

    pub fn has_more_text(&self) -> Option<&'static str> {
        self.has_more.then_some("View all")
    }

    /// Number of items per kind, keyed by the matching section type
    pub fn content_type_breakdown(&self) -> BTreeMap<SectionType, usize> {
        let mut breakdown = BTreeMap::new();
        for item in &self.items {
            *breakdown.entry(item.kind().section_type()).or_insert(0) += 1;
        }
        breakdown
    }

    /// "3 podcasts, 1 episodes" style summary, only for mixed sections with several kinds
    pub fn content_breakdown_text(&self) -> Option<String> {
        if self.section_type != SectionType::Mixed {
            return None;
        }

        let breakdown = self.content_type_breakdown();
        if breakdown.len() <= 1 {
            return None;
        }

        let mut entries: Vec<_> = breakdown.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Some(
            entries
                .into_iter()
                .map(|(kind, count)| format!("{count} {}", kind.display_name().to_lowercase()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Render a duration given in seconds
pub fn format_duration(duration: &str) -> String {
    let Ok(total) = duration.trim().parse::<i64>() else {
        return duration.to_string();
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else if minutes > 0 {
        format!("{minutes}:{seconds:02}")
    } else {
        format!("{seconds}s")
    }
}

fn parse_publish_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Render a publish date relative to `now`; unparseable values pass through
pub fn format_publish_date(value: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_publish_date(value.trim()) else {
        return value.to_string();
    };

    let days = (now.naive_utc() - date).num_days();

    match days {
        d if d < 1 => "Today".to_string(),
        d if d < 2 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        _ => date.format("%b %d, %Y").to_string(),
    }
}
