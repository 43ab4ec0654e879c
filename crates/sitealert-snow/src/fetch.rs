//! Site record retrieval: query construction, paging and parsing.

use async_trait::async_trait;
use sitealert_core::ParsedRecord;

use crate::error::SnowError;
use crate::parse::parse_record;
use crate::query::build_query;
use crate::types::{SnowPage, SnowQuery};

/// Upper bound on pages fetched for one site code.
pub const MAX_PAGES: usize = 200;

/// Performs one table API page request.
///
/// [`crate::SnowClient`] is the HTTP implementation; tests substitute an
/// in-memory one.
#[async_trait]
pub trait SiteTransport: Send + Sync {
    /// Fetches the rows for `query` along with the server's total count.
    async fn get_page(&self, query: &SnowQuery) -> Result<SnowPage, SnowError>;
}

/// Fetches and parses site records for raw site codes.
pub struct SiteDataFetcher<T> {
    transport: T,
    paginate: bool,
}

impl<T: SiteTransport> SiteDataFetcher<T> {
    /// When `paginate` is `false` only the requested page is fetched.
    pub fn new(transport: T, paginate: bool) -> Self {
        Self {
            transport,
            paginate,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the records matching `raw_code`, starting at `offset` with
    /// `limit` rows per page.
    ///
    /// With pagination enabled, further pages are requested while the
    /// server's `X-Total-Count` exceeds `offset + limit`. A page without a
    /// total count ends the walk.
    ///
    /// # Errors
    ///
    /// - [`SnowError::ZeroPageLimit`] if `limit` is zero.
    /// - [`SnowError::PaginationLimit`] if more than [`MAX_PAGES`] pages
    ///   would be needed.
    /// - Any error from the transport.
    pub async fn fetch(
        &self,
        raw_code: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<ParsedRecord>, SnowError> {
        if limit == 0 {
            return Err(SnowError::ZeroPageLimit);
        }

        let filter = build_query(raw_code);
        tracing::debug!(site_code = raw_code, filter = %filter, "built site query");

        let mut query = SnowQuery {
            filter,
            offset,
            limit,
            paginate: self.paginate,
        };
        let mut records = Vec::new();
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(SnowError::PaginationLimit {
                    site_code: raw_code.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let page = self.transport.get_page(&query).await?;
            tracing::debug!(
                site_code = raw_code,
                offset = query.offset,
                rows = page.rows.len(),
                total = ?page.total_count,
                "fetched site page"
            );

            records.extend(page.rows.iter().map(|row| parse_record(raw_code, row)));

            if !self.paginate {
                break;
            }

            let Some(next_offset) = query.offset.checked_add(query.limit) else {
                break;
            };
            match page.total_count {
                Some(total) if total > u64::from(next_offset) => query.offset = next_offset,
                Some(_) => break,
                None => {
                    tracing::warn!(
                        site_code = raw_code,
                        "paginated response had no total count; stopping after this page"
                    );
                    break;
                }
            }
        }

        Ok(records)
    }
}
