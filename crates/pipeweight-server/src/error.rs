use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeweight_types::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("No pipes data provided")]
    NoPipesData,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<pipeweight_types::Error> for ServiceError {
    fn from(e: pipeweight_types::Error) -> Self {
        match e {
            pipeweight_types::Error::EmptySubmission => Self::NoPipesData,
            pipeweight_types::Error::InvalidInput(msg) => Self::InvalidRequest(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // A body that is not declared as JSON carries no pipes
            JsonRejection::MissingJsonContentType(_) => Self::NoPipesData,
            other => Self::InvalidRequest(other.body_text()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NoPipesData => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
