//! WebSocket infrastructure for realtime collection subscriptions.
//!
//! Provides connection management, heartbeat monitoring, and the upgrade
//! handler that bridges a socket to a store subscription.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::subscribe_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
