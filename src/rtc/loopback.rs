use super::client::{RoomEvent, RtcClient};
use crate::room::{AccessCredential, PeerId, RoomCode};
use anyhow::{bail, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

/// Event channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct LoopbackRoom {
    room_id: Option<RoomCode>,
    peers: Vec<Option<String>>,
    audio: bool,
    video: bool,
    screen: bool,
}

/// In-process RTC client with no media transport.
///
/// Joins and leaves are confirmed immediately over the event channel.
/// Remote peers are simulated with `add_peer` / `remove_peer`.
pub struct LoopbackRtc {
    events: broadcast::Sender<RoomEvent>,
    room: Mutex<LoopbackRoom>,
    fail_joins: AtomicBool,
    join_calls: AtomicUsize,
}

impl LoopbackRtc {
    pub fn new() -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            events,
            room: Mutex::new(LoopbackRoom::default()),
            fail_joins: AtomicBool::new(false),
            join_calls: AtomicUsize::new(0),
        }
    }

    /// Make subsequent `join_room` calls fail
    pub fn fail_joins(&self, fail: bool) {
        self.fail_joins.store(fail, Ordering::SeqCst);
    }

    /// Number of `join_room` calls so far
    pub fn join_calls(&self) -> usize {
        self.join_calls.load(Ordering::SeqCst)
    }

    pub async fn current_room(&self) -> Option<RoomCode> {
        self.room.lock().await.room_id.clone()
    }

    /// Local media flags as (audio, video, screen)
    pub async fn media(&self) -> (bool, bool, bool) {
        let room = self.room.lock().await;
        (room.audio, room.video, room.screen)
    }

    /// Simulate a remote peer entering the room
    pub async fn add_peer(&self, peer_id: PeerId) {
        {
            let mut room = self.room.lock().await;
            room.peers.push(Some(peer_id.to_string()));
        }
        self.emit(RoomEvent::PeerJoined(peer_id));
    }

    /// Simulate a remote peer leaving the room
    pub async fn remove_peer(&self, peer_id: &PeerId) {
        let removed = {
            let mut room = self.room.lock().await;
            let before = room.peers.len();
            room.peers
                .retain(|slot| slot.as_deref() != Some(peer_id.as_str()));
            room.peers.len() != before
        };

        if removed {
            self.emit(RoomEvent::PeerLeft(peer_id.clone()));
        }
    }

    /// Insert an empty slot the way SDKs do mid-churn
    pub async fn add_placeholder(&self) {
        self.room.lock().await.peers.push(None);
    }

    /// Simulate the server removing the local participant
    pub async fn evict(&self) {
        self.room.lock().await.room_id = None;
        self.emit(RoomEvent::Left);
    }

    fn emit(&self, event: RoomEvent) {
        // No receivers is fine: nothing is mounted
        if self.events.send(event.clone()).is_err() {
            debug!("Dropped {:?}: no subscribers", event);
        }
    }
}

impl Default for LoopbackRtc {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RtcClient for LoopbackRtc {
    async fn join_room(&self, room_id: &RoomCode, credential: &AccessCredential) -> Result<()> {
        self.join_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_joins.load(Ordering::SeqCst) {
            bail!("loopback join rejected for room {}", room_id);
        }
        if credential.room_id != *room_id {
            bail!(
                "credential is scoped to room {}, not {}",
                credential.room_id,
                room_id
            );
        }

        {
            let mut room = self.room.lock().await;
            if let Some(current) = &room.room_id {
                warn!("Already in room {}, switching to {}", current, room_id);
            }
            room.room_id = Some(room_id.clone());
        }

        info!("Loopback joined room {} as {}", room_id, credential.role);
        self.emit(RoomEvent::Joined);
        Ok(())
    }

    async fn leave_room(&self) -> Result<()> {
        let left = {
            let mut room = self.room.lock().await;
            room.audio = false;
            room.video = false;
            room.screen = false;
            room.peers.clear();
            room.room_id.take()
        };

        match left {
            Some(room_id) => {
                info!("Loopback left room {}", room_id);
                self.emit(RoomEvent::Left);
                Ok(())
            }
            None => bail!("not in a room"),
        }
    }

    async fn enable_audio(&self) -> Result<()> {
        self.room.lock().await.audio = true;
        Ok(())
    }

    async fn disable_audio(&self) -> Result<()> {
        self.room.lock().await.audio = false;
        Ok(())
    }

    async fn enable_video(&self) -> Result<()> {
        self.room.lock().await.video = true;
        Ok(())
    }

    async fn disable_video(&self) -> Result<()> {
        self.room.lock().await.video = false;
        Ok(())
    }

    async fn start_screen_share(&self) -> Result<()> {
        self.room.lock().await.screen = true;
        Ok(())
    }

    async fn stop_screen_share(&self) -> Result<()> {
        self.room.lock().await.screen = false;
        Ok(())
    }

    async fn peer_ids(&self) -> Vec<Option<String>> {
        self.room.lock().await.peers.clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.events.subscribe()
    }

    fn name(&self) -> &str {
        "loopback"
    }
}
