//! Hrdesk - An HR roster administration service
//!
//! This crate provides an in-memory employee and department roster, the
//! aggregate views computed from it, and a JSON/WebSocket API over both.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod ws;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use store::{HrStore, Snapshot, StoreEvent};
