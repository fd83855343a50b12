//! Error handling for the bookshelf HTTP layer

use std::any::Any;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::response::Envelope;

/// Application error types that map to `{"status": "fail"}` responses.
///
/// The message is the text shown to clients; for `Internal` the source is
/// only logged.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("internal error: {source}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Create a bad request (validation) error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error shown to clients as `message`
    pub fn internal(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Internal {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text rendered into the envelope
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message, .. } => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status_code();

        match &self {
            AppError::Internal { source, .. } => tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = ?source,
                "request failed"
            ),
            _ => tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                message = %self.message(),
                "request rejected"
            ),
        }

        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message, .. } => message,
        };

        Envelope::<()> {
            status: "fail",
            message: Some(message),
            data: None,
        }
        .into_response_with(status)
    }
}

/// Client text for failures raised outside any handler
pub const SERVER_FAILURE: &str = "Terjadi kegagalan pada server";

/// Internal fail envelope for a handler that panicked; the payload is only logged
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };

    AppError::internal(SERVER_FAILURE, anyhow::anyhow!("handler panicked: {}", detail))
        .into_response()
}

/// Wrap bodyless error responses (router fallback, timeouts) in the fail envelope
pub async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let message = match status {
        StatusCode::NOT_FOUND => "Halaman tidak ditemukan",
        StatusCode::METHOD_NOT_ALLOWED => "Metode tidak diizinkan",
        StatusCode::REQUEST_TIMEOUT => "Permintaan melebihi batas waktu",
        status if status.is_server_error() => SERVER_FAILURE,
        _ => "Permintaan tidak valid",
    };
    tracing::warn!(
        status_code = %status.as_u16(),
        reason = message,
        "request rejected outside handlers"
    );

    let mut enveloped = Envelope::<()> {
        status: "fail",
        message: Some(message.to_string()),
        data: None,
    }
    .into_response_with(status);

    // keep headers such as `allow` from the original response
    for (name, value) in response.headers() {
        if *name != header::CONTENT_LENGTH {
            enveloped
                .headers_mut()
                .entry(name)
                .or_insert_with(|| value.clone());
        }
    }
    enveloped
}
