use utoipa::OpenApi;

pub const USER_TAG: &str = "Users";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Users",
        description = "User management API for the blog platform",
    ),
    paths(
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
