use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::Cookie;
use thiserror::Error;

use crate::session::SESSION_COOKIE;
use crate::utils::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("No active session")]
    NoSession,

    #[error("Session expired")]
    SessionExpired,

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(msg) => {
                tracing::warn!("Validation failed: {}", msg);
                StatusCode::BAD_REQUEST
            }
            ApiError::Auth(msg) => {
                tracing::warn!("Authentication rejected: {}", msg);
                StatusCode::UNAUTHORIZED
            }
            ApiError::NoSession | ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::Upstream { status, message } => {
                tracing::error!("Service Layer error ({}): {}", status, message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let clear_cookie = matches!(self, ApiError::SessionExpired);
        let body = Json(ApiResponse::error(self.to_string()));
        let mut response = (status, body).into_response();

        if clear_cookie {
            let removal = Cookie::build((SESSION_COOKIE, ""))
                .path("/")
                .max_age(time::Duration::ZERO)
                .build();
            if let Ok(value) = HeaderValue::from_str(&removal.to_string()) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }

        response
    }
}
