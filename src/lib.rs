pub mod actions;
pub mod config;
pub mod error;
pub mod http;
pub mod layout;
pub mod room;
pub mod rtc;
pub mod session;

pub use actions::{ActionClient, LocalRoomCreator, RoomCreator, SignedTokenIssuer, TokenIssuer};
pub use config::Config;
pub use error::{MeetError, Result};
pub use http::{create_router, AppState};
pub use layout::{plan_layout, Arrangement, ControlBar, LayoutPlan, Tile, TileKind, Viewport};
pub use room::{filter_peer_ids, AccessCredential, MeetingParams, PeerId, Role, RoomCode, Route};
pub use rtc::{LoopbackRtc, RoomEvent, RtcClient};
pub use session::{Focus, Lobby, MeetingAction, MeetingSession, MeetingState, SessionPhase};
