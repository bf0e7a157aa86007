use crate::error::{MeetError, Result};
use crate::room::{AccessCredential, Role, RoomCode};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, info};

type HmacSha256 = Hmac<Sha256>;

/// Default credential lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Issues access credentials scoped to a room and role
///
/// Implementations:
/// - `SignedTokenIssuer`: mints HMAC-signed tokens in-process (server side)
/// - `ActionClient`: asks a remote action server (client side)
#[async_trait::async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Request a credential for `room_id` with the given role
    async fn get_access_token(&self, room_id: &RoomCode, role: Role) -> Result<AccessCredential>;
}

/// Claims carried inside a signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub room_id: String,
    pub role: Role,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Mints compact `base64url(claims).base64url(hmac-sha256)` tokens
pub struct SignedTokenIssuer {
    secret: Vec<u8>,
    ttl_secs: u64,
}

impl SignedTokenIssuer {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: u64) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(MeetError::TokenIssuance(
                "token signing secret is empty".to_string(),
            ));
        }
        if ttl_secs == 0 {
            return Err(MeetError::TokenIssuance("token TTL must be positive".to_string()));
        }

        Ok(Self { secret, ttl_secs })
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Sign a credential for the room and role
    pub fn issue(&self, room_id: &RoomCode, role: Role) -> Result<AccessCredential> {
        let issued_at = Utc::now();
        let ttl = i64::try_from(self.ttl_secs)
            .map_err(|_| MeetError::TokenIssuance("token TTL out of range".to_string()))?;
        let expires_at = issued_at + Duration::seconds(ttl);

        let claims = TokenClaims {
            room_id: room_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes())?);

        debug!("Issued {} token for room {} (exp={})", role, room_id, claims.exp);

        Ok(AccessCredential {
            token: format!("{}.{}", payload, signature),
            room_id: room_id.clone(),
            role,
            expires_at,
        })
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| MeetError::InvalidToken("malformed token".to_string()))?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| MeetError::InvalidToken(format!("bad signature encoding: {}", e)))?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| MeetError::InvalidToken("signature mismatch".to_string()))?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| MeetError::InvalidToken(format!("bad payload encoding: {}", e)))?;
        let claims: TokenClaims = serde_json::from_slice(&claims_json)
            .map_err(|e| MeetError::InvalidToken(format!("bad claims: {}", e)))?;

        if claims.exp <= Utc::now().timestamp() {
            let expired_at = Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| claims.exp.to_string());
            return Err(MeetError::InvalidToken(format!("token expired at {}", expired_at)));
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| MeetError::TokenIssuance(format!("invalid signing key: {}", e)))
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = self.mac()?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[async_trait::async_trait]
impl TokenIssuer for SignedTokenIssuer {
    async fn get_access_token(&self, room_id: &RoomCode, role: Role) -> Result<AccessCredential> {
        let credential = self.issue(room_id, role)?;
        info!("Access token issued for room {} as {}", room_id, role);
        Ok(credential)
    }
}
