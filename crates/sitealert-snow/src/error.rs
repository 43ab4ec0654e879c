use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnowError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid Service Now URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("page limit must be greater than zero")]
    ZeroPageLimit,

    #[error("pagination limit reached for {site_code}: exceeded {max_pages} pages")]
    PaginationLimit { site_code: String, max_pages: usize },
}
