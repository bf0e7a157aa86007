use crate::actions::{RoomCreator, TokenIssuer};
use crate::room::{Role, RoomCode, Route};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Entry page actions: join an existing room or create a new one.
///
/// Only one action runs at a time; a second call while one is in
/// flight returns `None` without touching the collaborators.
pub struct Lobby {
    tokens: Arc<dyn TokenIssuer>,
    rooms: Arc<dyn RoomCreator>,
    busy: AtomicBool,
}

/// Clears the busy flag when the action finishes, however it finishes
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Lobby {
    pub fn new(tokens: Arc<dyn TokenIssuer>, rooms: Arc<dyn RoomCreator>) -> Self {
        Self {
            tokens,
            rooms,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether an action is in flight (buttons render disabled)
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        match self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => Some(InFlight(&self.busy)),
            Err(_) => {
                debug!("Lobby action already in flight");
                None
            }
        }
    }

    /// Join the room typed into the code input, as a guest.
    ///
    /// Blank input is ignored. Returns the meeting route on success.
    pub async fn join(&self, input: &str) -> Option<Route> {
        if input.trim().is_empty() {
            return None;
        }
        let _in_flight = self.begin()?;

        let code = match RoomCode::parse(input) {
            Ok(code) => code,
            Err(e) => {
                warn!("Error joining meet: {}", e);
                return None;
            }
        };

        match self.tokens.get_access_token(&code, Role::Guest).await {
            Ok(_) => {
                info!("Joining room {} as guest", code);
                Some(Route::meeting(code, Role::Guest))
            }
            Err(e) => {
                error!("Error joining meet: {}", e);
                None
            }
        }
    }

    /// Create a new room and enter it as host
    pub async fn create(&self) -> Option<Route> {
        let _in_flight = self.begin()?;

        let code = match self.rooms.create_room().await {
            Ok(code) => code,
            Err(e) => {
                error!("Error creating meet: {}", e);
                return None;
            }
        };

        match self.tokens.get_access_token(&code, Role::Host).await {
            Ok(_) => {
                info!("Created room {}, entering as host", code);
                Some(Route::meeting(code, Role::Host))
            }
            Err(e) => {
                error!("Error creating meet: {}", e);
                None
            }
        }
    }
}
