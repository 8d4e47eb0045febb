//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewUser, UpdateUser, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a user. Carries no id.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    #[schema(min_length = 2, max_length = 100)]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
}

impl CreateUserRequest {
    /// Converts the request DTO into a NewUser model for the service call.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
        }
    }
}

/// Request body for updating a user. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Converts the request DTO into an UpdateUser changeset.
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for a user record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}
