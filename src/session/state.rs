use crate::rtc::RoomEvent;
use crate::room::{filter_peer_ids, PeerId, Role, RoomCode, Route};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Room session lifecycle: `idle → joining → joined → leaving → left`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Joining,
    Joined,
    Leaving,
    Left,
}

/// Which room the user is in and as what
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub room_code: Option<RoomCode>,
    pub role: Role,
    pub phase: SessionPhase,
}

impl Session {
    pub fn is_joined(&self) -> bool {
        self.phase == SessionPhase::Joined
    }
}

/// Local media flags as last set by the user's toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocalMediaState {
    pub audio_enabled: bool,
    pub video_enabled: bool,
    pub screen_share_active: bool,
}

/// What occupies the enlarged region of the layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    /// The local screen share, which always wins over a pin
    ScreenShare,
    /// A pinned remote peer
    Peer(PeerId),
}

/// Everything that can change meeting state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingAction {
    /// Presence notification from the RTC collaborator
    Room(RoomEvent),
    /// Bootstrap started for a room
    BeginJoin(RoomCode),
    /// Bootstrap failed (missing code, token or join failure)
    InitFailed,
    /// User asked to leave
    BeginLeave,
    /// Fresh raw peer snapshot, placeholders included
    PeersSynced(Vec<Option<String>>),
    SetAudio(bool),
    SetVideo(bool),
    SetScreenShare(bool),
    /// Pin the peer, or unpin it if it is already pinned
    TogglePin(PeerId),
}

/// UI-side mirror of a meeting, updated only through `reduce`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingState {
    session: Session,
    media: LocalMediaState,
    peers: Vec<PeerId>,
    pinned: Option<PeerId>,
}

impl MeetingState {
    pub fn new(role: Role) -> Self {
        Self {
            session: Session {
                room_code: None,
                role,
                phase: SessionPhase::Idle,
            },
            media: LocalMediaState::default(),
            peers: Vec::new(),
            pinned: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn media(&self) -> LocalMediaState {
        self.media
    }

    /// Remote peers in join order
    pub fn peers(&self) -> &[PeerId] {
        &self.peers
    }

    pub fn pinned(&self) -> Option<&PeerId> {
        self.pinned.as_ref()
    }

    pub fn focus(&self) -> Option<Focus> {
        if self.media.screen_share_active {
            Some(Focus::ScreenShare)
        } else {
            self.pinned.clone().map(Focus::Peer)
        }
    }

    /// Apply one action. Returns a route when the action forces navigation.
    pub fn reduce(&mut self, action: MeetingAction) -> Option<Route> {
        match action {
            MeetingAction::BeginJoin(code) => {
                if self.session.phase != SessionPhase::Idle {
                    debug!("Ignoring join for {} in phase {:?}", code, self.session.phase);
                    return None;
                }
                self.session.room_code = Some(code);
                self.session.phase = SessionPhase::Joining;
                None
            }

            MeetingAction::InitFailed => match self.session.phase {
                SessionPhase::Idle | SessionPhase::Joining => {
                    self.enter_left();
                    Some(Route::Entry)
                }
                phase => {
                    debug!("Ignoring init failure in phase {:?}", phase);
                    None
                }
            },

            MeetingAction::BeginLeave => {
                if self.session.phase == SessionPhase::Joined {
                    self.session.phase = SessionPhase::Leaving;
                } else {
                    debug!("Leave requested in phase {:?}", self.session.phase);
                }
                None
            }

            MeetingAction::Room(event) => self.apply_room_event(event),

            MeetingAction::PeersSynced(raw) => {
                self.peers = filter_peer_ids(&raw);
                self.drop_stale_pin();
                None
            }

            MeetingAction::SetAudio(enabled) => {
                self.media.audio_enabled = enabled;
                None
            }

            MeetingAction::SetVideo(enabled) => {
                self.media.video_enabled = enabled;
                None
            }

            MeetingAction::SetScreenShare(active) => {
                // Screen share takes the focus region whichever way it flips
                self.media.screen_share_active = active;
                self.pinned = None;
                None
            }

            MeetingAction::TogglePin(peer_id) => {
                if self.media.screen_share_active {
                    debug!("Pinning disabled during screen share");
                    return None;
                }
                if !self.peers.contains(&peer_id) {
                    debug!("Cannot pin unknown peer {}", peer_id);
                    return None;
                }
                if self.pinned.as_ref() == Some(&peer_id) {
                    self.pinned = None;
                } else {
                    self.pinned = Some(peer_id);
                }
                None
            }
        }
    }

    fn apply_room_event(&mut self, event: RoomEvent) -> Option<Route> {
        match event {
            RoomEvent::Joined => {
                if self.session.phase == SessionPhase::Joining {
                    info!("Joined room {}", self.room_label());
                    self.session.phase = SessionPhase::Joined;
                } else {
                    debug!("Unexpected join in phase {:?}", self.session.phase);
                }
                None
            }

            RoomEvent::PeerJoined(peer_id) => {
                if self.session.phase == SessionPhase::Left {
                    return None;
                }
                info!("Peer joined: {}", peer_id);
                if !self.peers.contains(&peer_id) {
                    self.peers.push(peer_id);
                }
                None
            }

            RoomEvent::PeerLeft(peer_id) => {
                info!("Peer left: {}", peer_id);
                self.peers.retain(|p| *p != peer_id);
                self.drop_stale_pin();
                None
            }

            RoomEvent::Left => match self.session.phase {
                SessionPhase::Joined | SessionPhase::Leaving => {
                    info!("Left room {}", self.room_label());
                    self.enter_left();
                    Some(Route::Entry)
                }
                SessionPhase::Joining => {
                    warn!("Dropped from room {} before the join completed", self.room_label());
                    self.enter_left();
                    Some(Route::Entry)
                }
                phase => {
                    debug!("Unexpected leave in phase {:?}", phase);
                    None
                }
            },
        }
    }

    fn enter_left(&mut self) {
        self.session.phase = SessionPhase::Left;
        self.peers.clear();
        self.pinned = None;
    }

    fn drop_stale_pin(&mut self) {
        if let Some(pinned) = &self.pinned {
            if !self.peers.contains(pinned) {
                debug!("Pinned peer {} is gone, clearing focus", pinned);
                self.pinned = None;
            }
        }
    }

    fn room_label(&self) -> &str {
        self.session
            .room_code
            .as_ref()
            .map(RoomCode::as_str)
            .unwrap_or("<none>")
    }
}
