use crate::error::{MeetError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest room code accepted from user input
pub const MAX_ROOM_CODE_LEN: usize = 64;

/// Short identifier naming a meeting room (e.g. "abc-defg-hij")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Parse user or route input. Surrounding whitespace is trimmed.
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim();

        if code.is_empty() {
            return Err(MeetError::InvalidRoomCode("room code is empty".to_string()));
        }
        if code.len() > MAX_ROOM_CODE_LEN {
            return Err(MeetError::InvalidRoomCode(format!(
                "room code longer than {} characters",
                MAX_ROOM_CODE_LEN
            )));
        }
        if let Some(c) = code
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(MeetError::InvalidRoomCode(format!(
                "unexpected character {:?} in {:?}",
                c, code
            )));
        }

        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = MeetError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

/// Participant role, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    #[default]
    Guest,
}

impl Role {
    /// Interpret the `role` query value. Only the exact string "host"
    /// selects Host; anything else, including no value, is Guest.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("host") => Role::Host,
            _ => Role::Guest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Guest => "guest",
        }
    }

    /// Label shown on the local tile
    pub fn label(&self) -> &'static str {
        match self {
            Role::Host => "Host",
            Role::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote participant identifier, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct PeerId(String);

impl PeerId {
    /// Returns `None` for the empty placeholder ids the SDK emits during churn
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PeerId {
    type Error = MeetError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value).ok_or_else(|| MeetError::InvalidPeerId("peer id is empty".to_string()))
    }
}

/// Drop placeholder slots from a raw SDK peer list, keeping order
pub fn filter_peer_ids(raw: &[Option<String>]) -> Vec<PeerId> {
    raw.iter()
        .filter_map(|slot| slot.as_deref())
        .filter_map(PeerId::new)
        .collect()
}

/// Short-lived credential scoped to one room and role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCredential {
    pub token: String,
    pub room_id: RoomCode,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}
