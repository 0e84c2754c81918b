//! Pagination query parameters
//!
//! Every list endpoint takes `skip` (default 0) and `limit` (default 100).
//! Out-of-range values are rejected with 400 rather than clamped.

use swc_common::db::{Page, DEFAULT_LIMIT};

use crate::error::ApiError;

pub(crate) fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Validate raw `skip`/`limit` query values
pub fn page(skip: i64, limit: i64) -> Result<Page, ApiError> {
    Page::new(skip, limit).map_err(ApiError::from)
}
