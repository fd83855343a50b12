//! Uniform `{status, message?, data?}` response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Wire shape shared by success and failure responses
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub(crate) fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Successful handler result rendered as `{"status": "success", ...}`
#[derive(Debug)]
pub struct ApiResponse<T = ()> {
    status: StatusCode,
    message: Option<String>,
    data: Option<T>,
}

impl ApiResponse<()> {
    /// 200 OK without payload
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// 201 Created without payload
    pub fn created() -> Self {
        Self::with_status(StatusCode::CREATED)
    }

    fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the `data` payload
    pub fn with_data<U>(self, data: U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            message: self.message,
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Envelope {
            status: "success",
            message: self.message,
            data: self.data,
        }
        .into_response_with(self.status)
    }
}
