use crate::error::Result;
use crate::room::RoomCode;
use rand::Rng;
use tracing::info;

/// Creates new meeting rooms
#[async_trait::async_trait]
pub trait RoomCreator: Send + Sync {
    /// Create a room and return its code
    async fn create_room(&self) -> Result<RoomCode>;
}

/// Generates random `abc-defg-hij` room codes without any backing service
#[derive(Debug, Default, Clone)]
pub struct LocalRoomCreator;

impl LocalRoomCreator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl RoomCreator for LocalRoomCreator {
    async fn create_room(&self) -> Result<RoomCode> {
        let code = RoomCode::parse(&generate_room_code())?;
        info!("Created room {}", code);
        Ok(code)
    }
}

/// Three lowercase groups of 3, 4 and 3 letters
pub fn generate_room_code() -> String {
    let mut rng = rand::thread_rng();
    let mut group = |len: usize| -> String {
        (0..len)
            .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
            .collect()
    };

    let first = group(3);
    let second = group(4);
    let third = group(3);
    format!("{}-{}-{}", first, second, third)
}
