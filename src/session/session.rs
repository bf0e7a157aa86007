use super::state::{MeetingAction, MeetingState, SessionPhase};
use crate::actions::TokenIssuer;
use crate::layout::{plan_layout, ControlBar, LayoutPlan, Viewport};
use crate::room::{MeetingParams, PeerId, RoomCode, Route};
use crate::rtc::{RoomEvent, RtcClient};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, error, info, warn};

/// A mounted meeting page.
///
/// The RTC client is passed in rather than held globally. Mounting
/// subscribes to room events; `release` leaves the room if the session
/// is still connected.
pub struct MeetingSession {
    /// Real-time communication client
    rtc: Arc<dyn RtcClient>,

    /// Access-token issuer
    tokens: Arc<dyn TokenIssuer>,

    /// Route parameters this page was mounted with
    params: MeetingParams,

    /// Meeting state, changed only through `dispatch`
    state: MeetingState,

    /// Presence events from the RTC client
    events: broadcast::Receiver<RoomEvent>,

    /// Set once bootstrap has been attempted
    initialized: bool,

    /// Navigation requested by the last transition that forced one
    redirect: Option<Route>,
}

impl MeetingSession {
    /// Mount the meeting page for the given route parameters
    pub fn mount(
        rtc: Arc<dyn RtcClient>,
        tokens: Arc<dyn TokenIssuer>,
        params: MeetingParams,
    ) -> Self {
        let role = params.role();
        let events = rtc.subscribe();

        debug!(
            "Mounted meeting page (code={:?}, role={}, rtc={})",
            params.code,
            role,
            rtc.name()
        );

        Self {
            rtc,
            tokens,
            params,
            state: MeetingState::new(role),
            events,
            initialized: false,
            redirect: None,
        }
    }

    pub fn state(&self) -> &MeetingState {
        &self.state
    }

    /// Where the page must navigate, if anywhere
    pub fn redirect(&self) -> Option<&Route> {
        self.redirect.as_ref()
    }

    /// Request a credential and join the room.
    ///
    /// Runs at most once per mount. Any failure moves the session to
    /// `Left` and returns the entry route.
    pub async fn initialize(&mut self) -> Option<Route> {
        if self.initialized {
            debug!("Room already initialized");
            return None;
        }
        self.initialized = true;

        let code = match self.params.code.as_deref().map(RoomCode::parse) {
            Some(Ok(code)) => code,
            Some(Err(e)) => {
                warn!("Error initializing room: {}", e);
                return self.dispatch(MeetingAction::InitFailed);
            }
            None => {
                warn!("Error initializing room: no room code in route");
                return self.dispatch(MeetingAction::InitFailed);
            }
        };

        self.dispatch(MeetingAction::BeginJoin(code.clone()));
        let role = self.state.session().role;

        let credential = match self.tokens.get_access_token(&code, role).await {
            Ok(credential) => credential,
            Err(e) => {
                error!("Error initializing room {}: {}", code, e);
                return self.dispatch(MeetingAction::InitFailed);
            }
        };

        if let Err(e) = self.rtc.join_room(&code, &credential).await {
            error!("Error initializing room {}: {:#}", code, e);
            return self.dispatch(MeetingAction::InitFailed);
        }

        info!("Join requested for room {} as {}", code, role);
        None
    }

    /// Wait for the next room event and apply it.
    ///
    /// Returns `None` once the RTC client has dropped its event channel.
    pub async fn next_event(&mut self) -> Option<RoomEvent> {
        loop {
            match self.events.recv().await {
                Ok(event) => {
                    self.dispatch(MeetingAction::Room(event.clone()));
                    return Some(event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Missed {} room events, resyncing peers", skipped);
                    self.sync_peers().await;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Apply every event already queued without waiting. Returns how many.
    pub async fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.dispatch(MeetingAction::Room(event));
                    applied += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Missed {} room events, resyncing peers", skipped);
                    self.sync_peers().await;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return applied,
            }
        }
    }

    /// Replace the peer mirror with the RTC client's current list
    pub async fn sync_peers(&mut self) {
        let raw = self.rtc.peer_ids().await;
        self.dispatch(MeetingAction::PeersSynced(raw));
    }

    pub async fn toggle_audio(&mut self) {
        let enable = !self.state.media().audio_enabled;
        let result = if enable {
            self.rtc.enable_audio().await
        } else {
            self.rtc.disable_audio().await
        };

        match result {
            Ok(()) => {
                self.dispatch(MeetingAction::SetAudio(enable));
            }
            Err(e) => warn!("Failed to toggle audio: {:#}", e),
        }
    }

    pub async fn toggle_video(&mut self) {
        let enable = !self.state.media().video_enabled;
        let result = if enable {
            self.rtc.enable_video().await
        } else {
            self.rtc.disable_video().await
        };

        match result {
            Ok(()) => {
                self.dispatch(MeetingAction::SetVideo(enable));
            }
            Err(e) => warn!("Failed to toggle video: {:#}", e),
        }
    }

    /// Start or stop screen sharing. Either way the pin is cleared.
    pub async fn toggle_screen_share(&mut self) {
        let start = !self.state.media().screen_share_active;
        let result = if start {
            self.rtc.start_screen_share().await
        } else {
            self.rtc.stop_screen_share().await
        };

        match result {
            Ok(()) => {
                self.dispatch(MeetingAction::SetScreenShare(start));
            }
            Err(e) => warn!("Failed to toggle screen share: {:#}", e),
        }
    }

    /// Toggle the pin on a peer; no-op while screen sharing
    pub fn toggle_pin(&mut self, peer_id: PeerId) {
        self.dispatch(MeetingAction::TogglePin(peer_id));
    }

    /// Leave the room and go back to the entry page, whatever the
    /// RTC client reports.
    pub async fn leave(&mut self) -> Route {
        self.dispatch(MeetingAction::BeginLeave);

        if let Err(e) = self.rtc.leave_room().await {
            warn!("Error leaving room: {:#}", e);
        }

        self.redirect = Some(Route::Entry);
        Route::Entry
    }

    /// Unmount the page, leaving the room if still connected
    pub async fn release(self) {
        match self.state.phase() {
            SessionPhase::Joining | SessionPhase::Joined => {
                if let Err(e) = self.rtc.leave_room().await {
                    warn!("Error leaving room on release: {:#}", e);
                }
            }
            phase => debug!("Released session in phase {:?}", phase),
        }
    }

    /// Layout for the meeting UI, or `None` when no meeting UI should render
    pub fn view(&self, viewport: Viewport) -> Option<LayoutPlan> {
        match self.state.phase() {
            SessionPhase::Joined | SessionPhase::Leaving => Some(plan_layout(&self.state, viewport)),
            _ => None,
        }
    }

    pub fn controls(&self) -> ControlBar {
        ControlBar::from(self.state.media())
    }

    fn dispatch(&mut self, action: MeetingAction) -> Option<Route> {
        let route = self.state.reduce(action);
        if let Some(route) = &route {
            self.redirect = Some(route.clone());
        }
        route
    }
}
