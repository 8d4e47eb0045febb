//! Service layer: the user service contract and its in-memory binding.

mod memory;
mod user_service;

pub use memory::InMemoryUserService;
pub use user_service::UserService;
