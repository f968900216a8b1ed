mod home;
mod item;
mod search;

pub use home::{map_home_sections_response, map_section_layout, map_section_type};
pub use search::{map_search_query, map_search_response};
