mod content;
mod format;
mod result;
mod search;
mod section;
mod user_error;

pub use content::{AudioArticle, AudioBook, ContentItem, ContentKind, Episode, ItemInfo, Podcast};
pub use format::{format_duration, format_publish_date};
pub use result::LoadResult;
pub use search::{SearchFilters, SearchQuery, SearchResult};
pub use section::{ContentSection, SectionLayout, SectionType, section_id, sort_sections};
pub use user_error::{UserFacingError, display_error_message};
