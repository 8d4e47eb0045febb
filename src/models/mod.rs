//! Domain models for the user resource.

mod page;
mod user;

pub use page::{
    DEFAULT_PAGE_NO, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, SortField, UnknownSortField,
};
pub use user::{NewUser, UpdateUser, User};
