//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Largest page a listing endpoint will return.
pub const MAX_LIMIT: usize = 500;

/// Optional pagination parameters (`?limit=&offset=`).
///
/// Without `limit` a listing returns every row.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PaginationParams {
    /// Effective limit: `limit` clamped to `1..=MAX_LIMIT`, or unbounded.
    pub fn limit(&self) -> usize {
        self.limit
            .map(|l| l.clamp(1, MAX_LIMIT))
            .unwrap_or(usize::MAX)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}
