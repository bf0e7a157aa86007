use super::messages::{CreateRoomResponse, TokenRequest};
use super::rooms::RoomCreator;
use super::token::TokenIssuer;
use crate::error::{ErrorResponse, MeetError, Result};
use crate::room::{AccessCredential, Role, RoomCode};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the server-side actions exposed by `meet-room serve`
pub struct ActionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ActionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull the server's error message out of a failed response
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("server returned {}", status),
        }
    }
}

#[async_trait::async_trait]
impl TokenIssuer for ActionClient {
    async fn get_access_token(&self, room_id: &RoomCode, role: Role) -> Result<AccessCredential> {
        debug!("Requesting {} token for room {} from {}", role, room_id, self.base_url);

        let response = self
            .http
            .post(self.url("/api/token"))
            .json(&TokenRequest {
                room_id: room_id.to_string(),
                role,
            })
            .send()
            .await
            .map_err(|e| MeetError::TokenIssuance(format!("issuer unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(MeetError::TokenIssuance(Self::error_message(response).await));
        }

        let credential = response.json::<AccessCredential>().await?;
        info!("Received {} token for room {}", credential.role, credential.room_id);
        Ok(credential)
    }
}

#[async_trait::async_trait]
impl RoomCreator for ActionClient {
    async fn create_room(&self) -> Result<RoomCode> {
        let response = self
            .http
            .post(self.url("/api/rooms"))
            .send()
            .await
            .map_err(|e| MeetError::RoomCreation(format!("action server unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(MeetError::RoomCreation(Self::error_message(response).await));
        }

        let body = response.json::<CreateRoomResponse>().await?;
        RoomCode::parse(&body.room_id)
            .map_err(|e| MeetError::RoomCreation(format!("server returned bad room id: {}", e)))
    }
}
