mod fetcher;
mod registry;

pub use fetcher::{parse_feed, FeedClient, FeedFetcher, FeedItem};
pub use registry::default_sources;
