mod home;
mod search;

pub use home::{CachingHomeRepository, HomeRepository, SectionsResult};
pub use search::{LiveSearchRepository, SearchOutcome, SearchRepository};
