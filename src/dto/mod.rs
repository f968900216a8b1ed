mod home;
mod item;
mod lenient;
mod search;

pub use home::{HomeSectionDto, HomeSectionsResponse, Pagination};
pub use item::{ContentItemDto, IdentifierKind};
pub use search::{SearchFiltersDto, SearchRequest, SearchResponse, SearchSectionDto};
