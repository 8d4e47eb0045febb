//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by concern:
//! - `user` - User request/response DTOs
//! - `page` - Pagination query parameters
//! - `error` - Error response payload

mod error;
mod page;
mod user;

pub use error::ErrorResponse;
pub use page::PageQuery;
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
