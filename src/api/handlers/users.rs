//! User CRUD request handlers.
//!
//! Stateless adapters between the HTTP transport and the `UserService`
//! collaborator: each handler validates its inputs, forwards the call, and
//! translates the outcome into a status code. Side effects and id
//! assignment live entirely behind the service trait.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, ErrorResponse, PageQuery, UpdateUserRequest, UserResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - List users (paginated, sorted)
/// - POST /       - Create a new user
/// - GET /{id}    - Get user by ID
/// - PUT /{id}    - Update user by ID
/// - DELETE /{id} - Delete user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// Path ids must be positive; requests failing this never reach the service.
fn positive_id(id: i64) -> AppResult<i64> {
    if id < 1 {
        return Err(AppError::validation("id", "must be a positive integer"));
    }
    Ok(id)
}

/// GET /api/v1/users - List users
///
/// Returns one page of users, sorted ascending by the requested column.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = [UserResponse]),
        (status = 400, description = "Invalid pagination or sort parameters", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let page = query.into_page_request()?;
    tracing::debug!(page_no = page.page_no, page_size = page.page_size, sort_by = page.sort_by.as_str(), "listing users");
    let users = state.users.find_all(&page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id} - Get user by ID
///
/// Returns the user or 404 with an empty body.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id, positive integer")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Non-positive id", body = ErrorResponse),
        (status = 404, description = "No user with this id")
    ),
    tag = USER_TAG
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let id = positive_id(id)?;
    match state.users.find_by_id(id).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(AppError::not_found("user", "id", id)),
    }
}

/// POST /api/v1/users - Create user
///
/// Returns 201 with the created record, including its assigned id.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Payload failed validation", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users.create(payload.into_new_user()).await?;
    tracing::debug!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /api/v1/users/{id} - Update user
///
/// Applies the payload to an existing user; 404 when the id matches nothing.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id, positive integer")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Non-positive id or invalid payload", body = ErrorResponse),
        (status = 404, description = "No user with this id"),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let id = positive_id(id)?;
    let user = state.users.update(id, payload.into_update_user()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/v1/users/{id} - Delete user
///
/// Always returns 204; deletion is idempotent from the caller's view.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id, positive integer")),
    responses(
        (status = 204, description = "User deleted (or was already absent)"),
        (status = 400, description = "Non-positive id", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let id = positive_id(id)?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_id_accepts_one_and_above() {
        assert_eq!(positive_id(1).unwrap(), 1);
        assert_eq!(positive_id(i64::MAX).unwrap(), i64::MAX);
    }

    #[test]
    fn positive_id_rejects_zero_and_negatives() {
        assert!(matches!(
            positive_id(0).unwrap_err(),
            AppError::Validation { .. }
        ));
        assert!(matches!(
            positive_id(-7).unwrap_err(),
            AppError::Validation { .. }
        ));
    }
}
