//! Shared request types for handlers.

use campline_postgres::query::Pagination;
use serde::Deserialize;

/// Pagination query parameters (`?limit=50&offset=0`).
///
/// Values are clamped by the data layer's [`Pagination`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    /// Maximum number of records to return.
    pub limit: Option<i64>,
    /// Number of records to skip.
    pub offset: Option<i64>,
}

impl PaginationQuery {
    /// Converts the query parameters into clamped [`Pagination`].
    pub fn into_pagination(self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.limit.unwrap_or(defaults.limit),
            self.offset.unwrap_or(defaults.offset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let pagination = PaginationQuery::default().into_pagination();
        assert_eq!(pagination.limit, 50);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn values_are_clamped() {
        let query = PaginationQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        let pagination = query.into_pagination();
        assert_eq!(pagination.limit, 1000);
        assert_eq!(pagination.offset, 0);
    }
}
