use crate::room::{AccessCredential, PeerId, RoomCode};
use anyhow::Result;
use tokio::sync::broadcast;

/// Presence notifications from the real-time communication collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// The local participant is now in the room
    Joined,
    /// A remote peer entered the room
    PeerJoined(PeerId),
    /// A remote peer left the room
    PeerLeft(PeerId),
    /// The local participant is out of the room
    Left,
}

/// Real-time communication client trait
///
/// Media transport, signaling and encryption all live behind this
/// interface. Implementations:
/// - `LoopbackRtc`: in-process client for local runs and tests
/// - an SDK binding in a deployed front end
#[async_trait::async_trait]
pub trait RtcClient: Send + Sync {
    /// Join a room with a credential scoped to it.
    ///
    /// Success here means the request was accepted; membership is
    /// confirmed by a `RoomEvent::Joined` on the event channel.
    async fn join_room(&self, room_id: &RoomCode, credential: &AccessCredential) -> Result<()>;

    /// Leave the current room; confirmed by `RoomEvent::Left`
    async fn leave_room(&self) -> Result<()>;

    async fn enable_audio(&self) -> Result<()>;
    async fn disable_audio(&self) -> Result<()>;

    async fn enable_video(&self) -> Result<()>;
    async fn disable_video(&self) -> Result<()>;

    async fn start_screen_share(&self) -> Result<()>;
    async fn stop_screen_share(&self) -> Result<()>;

    /// Raw peer list as the SDK exposes it, placeholders included
    async fn peer_ids(&self) -> Vec<Option<String>>;

    /// Subscribe to presence events
    fn subscribe(&self) -> broadcast::Receiver<RoomEvent>;

    /// Client name for logging
    fn name(&self) -> &str;
}
