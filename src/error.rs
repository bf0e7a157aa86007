use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum MeetError {
    #[error("Invalid room code: {0}")]
    InvalidRoomCode(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Invalid peer id: {0}")]
    InvalidPeerId(String),

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("Room creation failed: {0}")]
    RoomCreation(String),

    #[error("Failed to join room: {0}")]
    Join(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeetError>;

/// Error body returned by the action server
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl MeetError {
    fn status_code(&self) -> StatusCode {
        match self {
            MeetError::InvalidRoomCode(_)
            | MeetError::InvalidPeerId(_)
            | MeetError::InvalidToken(_) => StatusCode::BAD_REQUEST,
            MeetError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MeetError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
