//! Pagination query parameters.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::{AppError, AppResult, ValidationFieldError};
use crate::models::{DEFAULT_PAGE_NO, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, SortField};

/// Query parameters for the user list endpoint.
///
/// Wire names follow the API contract: `pageNo`, `pageSize`, `sortBy`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Zero-based page index
    #[serde(default = "default_page_no")]
    #[param(minimum = 0, example = 0)]
    pub page_no: u32,

    /// Number of records per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub page_size: u32,

    /// Sort column, ascending
    #[serde(default = "default_sort_by")]
    #[param(example = "id")]
    pub sort_by: String,
}

fn default_page_no() -> u32 {
    DEFAULT_PAGE_NO
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    SortField::Id.as_str().to_string()
}

impl PageQuery {
    /// Resolves the raw query into a page descriptor.
    ///
    /// An unknown `sortBy` value is a boundary-validation error; it never
    /// reaches the service collaborator.
    pub fn into_page_request(self) -> AppResult<PageRequest> {
        let sort_by = self.sort_by.parse::<SortField>().map_err(|_| {
            AppError::Validation {
                errors: vec![ValidationFieldError {
                    field: "sortBy".to_string(),
                    message: format!("must be one of: {}", SortField::ALLOWED.join(", ")),
                }],
            }
        })?;
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(
                "pageSize",
                &format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        Ok(PageRequest {
            page_no: self.page_no,
            page_size: self.page_size,
            sort_by,
        })
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_no: default_page_no(),
            page_size: default_page_size(),
            sort_by: default_sort_by(),
        }
    }
}
