mod fetch;
mod home;
mod search;

pub use fetch::fetch_json;
pub use home::{HomeDataSource, NetworkHomeDataSource};
pub use search::{NetworkSearchDataSource, SearchDataSource};
