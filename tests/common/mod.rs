// Shared test doubles for the action collaborators
#![allow(dead_code)]

use chrono::Utc;
use meet_room::{AccessCredential, MeetError, Result, Role, RoomCode, RoomCreator, TokenIssuer};
use std::sync::Mutex;
use std::time::Duration;

/// Records every token request; optionally fails or stalls
#[derive(Default)]
pub struct MockTokenIssuer {
    pub requests: Mutex<Vec<(String, Role)>>,
    pub fail: bool,
    pub delay: Option<Duration>,
}

impl MockTokenIssuer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<(String, Role)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn get_access_token(&self, room_id: &RoomCode, role: Role) -> Result<AccessCredential> {
        self.requests
            .lock()
            .unwrap()
            .push((room_id.to_string(), role));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(MeetError::TokenIssuance("issuer unreachable".to_string()));
        }

        Ok(AccessCredential {
            token: format!("token-{}-{}", room_id, role),
            room_id: room_id.clone(),
            role,
            expires_at: Utc::now() + chrono::Duration::hours(1),
        })
    }
}

/// Hands out a fixed room code and counts calls
pub struct MockRoomCreator {
    pub code: String,
    pub calls: Mutex<usize>,
    pub fail: bool,
    pub delay: Option<Duration>,
}

impl MockRoomCreator {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            calls: Mutex::new(0),
            fail: false,
            delay: None,
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl RoomCreator for MockRoomCreator {
    async fn create_room(&self) -> Result<RoomCode> {
        *self.calls.lock().unwrap() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(MeetError::RoomCreation("service down".to_string()));
        }

        RoomCode::parse(&self.code)
    }
}
