//! Change notification and realtime subscriptions.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DocumentEvent`]: the change envelope published after every write.
//! - [`NotifyingStore`]: a store decorator that publishes those events.
//! - [`subscribe`]: snapshot-on-change delivery for one collection.

pub mod bus;
pub mod notify;
pub mod subscription;

pub use bus::{ChangeKind, DocumentEvent, EventBus};
pub use notify::NotifyingStore;
pub use subscription::{subscribe, Snapshot, Subscription};
