use super::state::AppState;
use crate::actions::{CreateRoomResponse, TokenRequest};
use crate::error::MeetError;
use crate::room::{AccessCredential, RoomCode};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

/// POST /api/rooms
/// Create a new room
pub async fn create_room(
    State(state): State<AppState>,
) -> Result<Json<CreateRoomResponse>, MeetError> {
    let code = state.rooms.create_room().await?;

    info!("Room created: {}", code);

    Ok(Json(CreateRoomResponse {
        room_id: code.to_string(),
    }))
}

/// POST /api/token
/// Issue an access token scoped to a room and role
pub async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<AccessCredential>, MeetError> {
    let code = RoomCode::parse(&req.room_id)?;

    info!("Issuing {} token for room {}", req.role, code);

    let credential = state.tokens.get_access_token(&code, req.role).await?;
    Ok(Json(credential))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
