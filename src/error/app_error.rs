use thiserror::Error;

/// One violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type.
///
/// Every failure a handler can surface maps to exactly one variant; the
/// HTTP translation lives in `api::middleware::error_handler`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup on an id (or other key) that matched nothing
    #[error("resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Unique-constraint violation
    #[error("duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// One or more request fields violated their constraints
    #[error("validation failed with {} violation(s)", .errors.len())]
    Validation { errors: Vec<ValidationFieldError> },

    /// Malformed request that never reached validation (bad JSON, bad query string)
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Invalid or missing configuration
    #[error("configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Unexpected failure
    #[error("internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds a single-field validation error.
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            errors: vec![ValidationFieldError {
                field: field.to_string(),
                message: message.to_string(),
            }],
        }
    }

    /// Builds a not-found error for the given entity lookup.
    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, violations)| {
                let field = field.to_string();
                violations.iter().map(move |v| ValidationFieldError {
                    field: field.clone(),
                    message: v
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("violates constraint '{}'", v.code)),
                })
            })
            .collect();
        // HashMap iteration order is arbitrary; keep the payload deterministic
        fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        AppError::Validation { errors: fields }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
