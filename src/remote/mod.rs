pub mod endpoint;
pub mod fetcher;

pub use endpoint::PatternEndpoint;
pub use fetcher::{FetchResult, PatternFetcher, PatternImage};
