//! Price-feed providers.

pub mod provider;
pub mod sina;

pub use provider::{FeedError, MinuteFeed};
pub use sina::SinaFuturesFeed;
