//! WebSocket change feed

mod hub;

pub use hub::{next_event_message, serve_ws, ClientInfo, ClientMessage, Hub, ServerMessage};
