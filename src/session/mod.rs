//! Meeting session management
//!
//! This module provides:
//! - `MeetingState`: the reducer behind the room session lifecycle
//! - `MeetingSession`: the mounted meeting page (bootstrap, media
//!   toggles, pinning, teardown)
//! - `Lobby`: the entry page's guarded join/create actions

mod lobby;
mod session;
mod state;

pub use lobby::Lobby;
pub use session::MeetingSession;
pub use state::{Focus, LocalMediaState, MeetingAction, MeetingState, Session, SessionPhase};
