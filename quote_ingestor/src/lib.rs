//! Daily quote retrieval: symbol validation, the provider seam, response
//! classification, rate limiting and an injectable result cache.

pub mod cache;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod providers;
pub mod rate_limit;

pub use errors::{FetchError, ParseError};
pub use fetcher::QuoteFetcher;
