use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The controller rejected our credentials and no fallback list is configured.
    #[error("Upstream rejected credentials with status {status}")]
    UpstreamAuth {
        status: StatusCode,
        body: axum::body::Bytes,
        content_type: Option<HeaderValue>,
    },

    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(#[from] serde_json::Error),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Attach the controller's Content-Type to a passed-through rejection.
    pub fn with_content_type(self, content_type: Option<HeaderValue>) -> Self {
        match self {
            AppError::UpstreamAuth { status, body, .. } => AppError::UpstreamAuth {
                status,
                body,
                content_type,
            },
            other => other,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamAuth {
                status,
                body,
                content_type,
            } => {
                // Passed through untouched
                let mut response = (*status, body.clone()).into_response();
                if let Some(content_type) = content_type {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, content_type.clone());
                }
                return response;
            }
            AppError::UpstreamMalformed(_) | AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let message = match &self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::BadRequest(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::UpstreamMalformed(_) | AppError::Upstream(_) => {
                "Bad response from network controller".to_string()
            }
            _ => "Internal server error".to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
