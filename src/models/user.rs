use jiff::Timestamp;
use serde::Deserialize;

/// User record as owned by the service collaborator.
///
/// The id is assigned by the service on creation and never changes afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a user. Carries no id; the service assigns one.
#[derive(Debug, Deserialize, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial changeset for updating a user. `None` fields are left untouched.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}
