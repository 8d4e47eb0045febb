//! Page descriptor for list queries.
//!
//! A `PageRequest` is built per request from query parameters and describes
//! one slice of the user collection: page index, page size, and sort key.

use std::str::FromStr;

use thiserror::Error;

/// Default page index when the client omits `pageNo`.
pub const DEFAULT_PAGE_NO: u32 = 0;
/// Default page size when the client omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on `pageSize`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Columns the user collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Email,
    CreatedAt,
}

impl SortField {
    /// Accepted `sortBy` values, in wire spelling.
    pub const ALLOWED: &'static [&'static str] = &["id", "name", "email", "createdAt"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::CreatedAt => "createdAt",
        }
    }
}

/// Error returned when a `sortBy` value names no sortable column.
#[derive(Debug, Error)]
#[error("unknown sort field '{0}'")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            // snake_case accepted as a convenience alias
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

/// One page worth of a sorted query: zero-based index, size, and sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: u32,
    pub page_size: u32,
    pub sort_by: SortField,
}

impl PageRequest {
    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> usize {
        self.page_no as usize * self.page_size as usize
    }

    /// Maximum number of records on this page.
    pub fn limit(&self) -> usize {
        self.page_size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_no: DEFAULT_PAGE_NO,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::Id,
        }
    }
}
