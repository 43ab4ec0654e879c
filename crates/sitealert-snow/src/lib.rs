pub mod client;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod query;
pub mod types;

pub use client::SnowClient;
pub use error::SnowError;
pub use fetch::{SiteDataFetcher, SiteTransport};
pub use normalize::normalize_site_code;
pub use parse::{parse_record, RecordCategory};
pub use query::{build_query, SiteClass};
pub use types::{SnowPage, SnowQuery, REQUEST_FIELDS};
