use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gather_shared::store::StoreError;
use log::error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Service-level error, converted to the standard JSON envelope by the
/// `IntoResponse` impl below.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Unrecognized action value. Distinct from `NotFound` internally, but
    /// reported as 404 to keep the wire contract unchanged.
    #[error("{0}")]
    InvalidAction(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn not_found(message: String) -> Self {
        Self::NotFound(message)
    }

    pub fn bad_request(message: String) -> Self {
        Self::BadRequest(message)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::Unauthorized(message)
    }

    pub fn invalid_action(message: String) -> Self {
        Self::InvalidAction(message)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            // Only activities are ever written, so an update-time miss is
            // always an activity. The raw document id stays out of the
            // envelope.
            StoreError::NotFound(_) => AppError::NotFound("Activity not found".to_string()),
            StoreError::VersionConflict(_) => AppError::Conflict(
                "The activity was modified by another request, please retry".to_string(),
            ),
            StoreError::InternalError(message) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) | AppError::InvalidAction(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", self);
        }

        let body = Json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
            "data": {}
        }));

        (status, body).into_response()
    }
}
