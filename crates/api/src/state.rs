use std::sync::Arc;

use tokio::sync::Mutex;

use folio_db::DocumentStore;
use folio_events::{EventBus, NotifyingStore};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The document store. Every write through it is announced on `event_bus`.
    pub store: Arc<dyn DocumentStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (realtime subscribers).
    pub ws_manager: Arc<WsManager>,
    /// Change notifications for realtime subscriptions.
    pub event_bus: Arc<EventBus>,
    /// Held while a refresh token is looked up and revoked, so one token
    /// rotates at most once.
    pub refresh_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Wrap `backend` so its writes reach the event bus, and assemble the state.
    pub fn new(backend: Arc<dyn DocumentStore>, config: ServerConfig) -> Self {
        let event_bus = Arc::new(EventBus::default());
        let store: Arc<dyn DocumentStore> =
            Arc::new(NotifyingStore::new(backend, Arc::clone(&event_bus)));

        Self {
            store,
            config: Arc::new(config),
            ws_manager: Arc::new(WsManager::new()),
            event_bus,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
