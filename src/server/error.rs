use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type ApiResponse<T> = Result<T, ApiError>;

/// Failure modes of the HTTP API. Every variant renders as the fixed
/// envelope `{"success": false, "error": <status>, "message": <text>}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input, or an operation invoked on a missing record.
    BadRequest,
    /// Empty page or unknown category.
    NotFound,
    /// Reserved; no route currently produces it.
    Unprocessable,
    /// Store or invariant failure. Detail is logged, never sent to clients.
    Internal(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad Request",
            ApiError::NotFound => "Not Found",
            ApiError::Unprocessable => "Unprocessable",
            ApiError::Internal(_) => "server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(error) = &self {
            tracing::error!("Internal error: {error:#}");
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => ApiError::BadRequest,
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::BadRequest
    }
}

/// `axum::Json` with rejections rendered as the error envelope instead of
/// axum's plain-text responses.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
