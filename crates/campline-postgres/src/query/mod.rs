//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations for all entities, encapsulating common patterns
//! and providing type-safe interfaces.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`] struct
//! to provide consistent, bounded pagination across the system.

pub mod account;
pub mod event;
pub mod message;
pub mod notification;
pub mod registration;
pub mod room;

pub use account::{AccountAccess, AccountRepository};
pub use event::EventRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use registration::RegistrationRepository;
pub use room::{AllocationSummary, AssignmentOutcome, RoomOccupancy, RoomRepository};
use serde::{Deserialize, Serialize};

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 1000
            limit: limit.clamp(1, 1000),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 1000);
        Self::new(page_size, (page - 1) * page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_limit_and_offset() {
        let pagination = Pagination::new(5000, -3);
        assert_eq!(pagination.limit, 1000);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn page_conversion() {
        let pagination = Pagination::from_page(3, 25);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 50);
    }

    #[test]
    fn first_page_starts_at_zero() {
        let pagination = Pagination::from_page(0, 10);
        assert_eq!(pagination.offset, 0);
    }
}
