// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{message::ErrorBody, services::relay_client::RelayError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Invalid request: {}", .0.body_text())]
    InvalidRequest(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Relay(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::InvalidRequest(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
