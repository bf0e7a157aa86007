//! Server-side actions: access-token issuance and room creation
//!
//! The traits are the seams the lobby and meeting session depend on.
//! `SignedTokenIssuer` and `LocalRoomCreator` back the HTTP action server;
//! `ActionClient` reaches that server from a client.

mod client;
pub mod messages;
mod rooms;
mod token;

pub use client::ActionClient;
pub use messages::{CreateRoomResponse, TokenRequest};
pub use rooms::{generate_room_code, LocalRoomCreator, RoomCreator};
pub use token::{SignedTokenIssuer, TokenClaims, TokenIssuer, DEFAULT_TOKEN_TTL_SECS};
