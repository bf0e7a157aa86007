//! HTTP action server
//!
//! Exposes the server-side actions the front end needs:
//! - POST /api/rooms - Create a room
//! - POST /api/token - Issue an access token for a room and role
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
