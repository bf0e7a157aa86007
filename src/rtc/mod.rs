pub mod client;
pub mod loopback;

pub use client::{RoomEvent, RtcClient};
pub use loopback::LoopbackRtc;
