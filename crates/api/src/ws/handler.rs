use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use folio_core::collection::Collection;
use folio_db::Filter;
use folio_events::{subscribe, Snapshot};
use futures::{SinkExt, StreamExt};

use crate::error::AppResult;
use crate::handlers::documents::{parse_collection, FilterQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/collections/{collection}/subscribe
///
/// Upgrades to a WebSocket that receives a JSON [`Snapshot`] of the
/// collection immediately and after every change to it. Accepts the same
/// `?filters=` as the list endpoint.
pub async fn subscribe_handler(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(collection): Path<String>,
    Query(query): Query<FilterQuery>,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let collection = parse_collection(&collection)?;
    let filters = query.parse()?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, collection, filters, admin.subject)))
}

/// Drive one subscription socket until either side goes away.
///
/// Snapshots are produced by the store subscription and forwarded through
/// the manager channel; inbound frames are only watched for Close.
async fn handle_socket(
    socket: WebSocket,
    state: AppState,
    collection: Collection,
    filters: Vec<Filter>,
    subject: String,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();

    let (tx, mut rx) = state
        .ws_manager
        .add(conn_id.clone(), subject, collection)
        .await;
    let subscribers = state.ws_manager.subscriber_count(collection).await;
    tracing::info!(conn_id = %conn_id, %collection, subscribers, "WebSocket subscribed");

    let subscription = subscribe(
        state.store.clone(),
        &state.event_bus,
        collection,
        filters,
        move |snapshot: Snapshot| match serde_json::to_string(&snapshot) {
            Ok(text) => {
                let _ = tx.send(Message::Text(text.into()));
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize snapshot"),
        },
    );

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    subscription.unsubscribe();
    let connected_secs = state
        .ws_manager
        .remove(&conn_id)
        .await
        .map(|conn| (chrono::Utc::now() - conn.connected_at).num_seconds());
    send_task.abort();
    tracing::info!(conn_id = %conn_id, ?connected_secs, "WebSocket unsubscribed");
}
