//! # API Response Types
//!
//! Generic API response types for the Deskline application.
//! Provides a consistent response format for all API endpoints.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "success": true,
//!   "data": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Generic API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful.
    pub success: bool,

    /// Response payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error code on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response wrapping `data`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data:    Some(data),
            code:    None,
            message: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(code: impl ToString, message: impl ToString) -> Self {
        Self {
            success: false,
            data:    None,
            code:    Some(code.to_string()),
            message: Some(message.to_string()),
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaginationMeta {
    /// Current page number (1-indexed).
    pub page: u64,

    /// Number of items per page.
    pub per_page: u64,

    /// Total number of items.
    pub total_items: u64,

    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Maximum allowed page number to prevent integer overflow and excessive offsets
    const MAX_PAGE: u64 = 1_000_000;

    /// Create a new pagination meta with overflow protection.
    ///
    /// # Arguments
    ///
    /// * `page` - Page number (1-based)
    /// * `per_page` - Items per page
    /// * `total_items` - Total number of items
    ///
    /// Clamps `page` to `MAX_PAGE` if it exceeds the maximum allowed value.
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let page = page.clamp(1, Self::MAX_PAGE);
        let per_page = per_page.max(1);
        let total_pages = if total_items == 0 {
            0
        }
        else {
            total_items.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }
}
