use crate::actions::{RoomCreator, TokenIssuer};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Mints access tokens for `/api/token`
    pub tokens: Arc<dyn TokenIssuer>,
    /// Creates rooms for `/api/rooms`
    pub rooms: Arc<dyn RoomCreator>,
}

impl AppState {
    pub fn new(tokens: Arc<dyn TokenIssuer>, rooms: Arc<dyn RoomCreator>) -> Self {
        Self { tokens, rooms }
    }
}
