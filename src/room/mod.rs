//! Room identity types and the route surface
//!
//! - `RoomCode`, `Role`, `PeerId` value types
//! - `AccessCredential` issued for a room and role
//! - `Route` for the entry page and `/{code}?role=...` meeting page

mod route;
mod types;

pub use route::{MeetingParams, Route};
pub use types::{filter_peer_ids, AccessCredential, PeerId, Role, RoomCode, MAX_ROOM_CODE_LEN};
