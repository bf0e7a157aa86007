use crate::room::Role;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/token`
///
/// The room id stays a plain string on the wire so the server can
/// answer malformed codes with a 400 instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub room_id: String,
    #[serde(default)]
    pub role: Role,
}

/// Response of `POST /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
}
