use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::Request;
use rocket::Response;
use rocket_okapi::JsonSchema;
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use thiserror::Error;
use validator::ValidationErrors;

use crate::utils::validation::field_details;

/// One failed validation rule, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Error, Debug, Serialize, JsonSchema)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation error for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            message: "Validation error".to_string(),
            details: vec![FieldError {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }

    pub fn status(&self) -> Status {
        match self {
            AppError::Validation { .. } => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Conflict(_) => Status::Conflict,
            AppError::DatabaseError(_) => Status::InternalServerError,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    /// The JSON body sent to the client for this error.
    pub fn body(&self) -> serde_json::Value {
        match self {
            AppError::Validation { message, details } => json!({
                "error": message,
                "details": details,
                "success": false
            }),
            AppError::DatabaseError(_) | AppError::Internal(_) => json!({
                "error": "Internal server error",
                "message": self.to_string(),
                "success": false
            }),
            _ => json!({
                "error": self.to_string(),
                "success": false
            }),
        }
    }
}

// Convert sqlx::Error (database error) to AppError, surfacing unique key
// violations as conflicts
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict("Duplicate entry".into());
            }
        }
        AppError::DatabaseError(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation {
            message: "Validation error".to_string(),
            details: field_details(&errors),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;

// Format all error from route level to a Http Response at route level
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            log::error!("{} {} failed: {}", request.method(), request.uri(), self);
        }

        let body = self.body().to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
