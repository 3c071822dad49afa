//! Per-connection handling: handshake, receive loop and teardown.

use crate::connection::{ConnectionId, ConnectionState};
use crate::context::ServerContext;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::OwnedSemaphorePermit;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};
use tracing::{debug, error, info, warn};

type WsSink = futures::stream::SplitSink<WebSocketStream<TcpStream>, Message>;

/// Serves one client from handshake to disconnect.
///
/// Inbound frames are handled strictly in order: each one is decoded,
/// dispatched and its reply queued before the next frame is read. The loop
/// also ends when the server shuts down. On exit the connection is
/// deregistered, the sessions it created are dropped and `slot` is
/// released.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    context: Arc<ServerContext>,
    slot: OwnedSemaphorePermit,
) {
    let mut state = ConnectionState::Connecting;

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake failed for {}: {}", addr, e);
            advance(&mut state, ConnectionState::Closed, None);
            return;
        }
    };

    let (ws_sink, mut ws_receiver) = ws_stream.split();
    let (connection_id, outbound) = context.connections().register(addr);
    advance(&mut state, ConnectionState::Open, Some(connection_id));

    let writer = tokio::spawn(write_outbound(connection_id, ws_sink, outbound));
    let mut shutdown_rx = context.shutdown_signal();

    loop {
        if *shutdown_rx.borrow_and_update() {
            info!("Closing connection {}: server shutting down", connection_id);
            break;
        }

        let frame = tokio::select! {
            biased;
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            frame = ws_receiver.next() => frame,
        };

        // Pings are answered by tungstenite itself
        match frame {
            Some(Ok(Message::Text(text))) => {
                if let Err(e) = context.dispatcher().handle_message(connection_id, text.as_str()) {
                    error!("Failed to reply to {}: {}", connection_id, e);
                    break;
                }
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
            Some(Ok(Message::Close(_))) => {
                info!("Connection {} requested close", connection_id);
                break;
            }
            Some(Ok(Message::Binary(_))) => {
                warn!("Ignoring binary frame from {}", connection_id);
            }
            Some(Err(e)) => {
                warn!("WebSocket error for connection {}: {}", connection_id, e);
                break;
            }
            None => break,
        }
    }

    context.connections().deregister(connection_id);
    context.sessions().end_sessions_for(connection_id);
    advance(&mut state, ConnectionState::Closed, Some(connection_id));

    if let Err(e) = writer.await {
        debug!("Writer task for {} ended abnormally: {}", connection_id, e);
    }
    drop(slot);
}

/// Drains the connection's outbound queue into the socket. Ends when the
/// queue closes (connection deregistered), after a close frame, or on the
/// first write error.
async fn write_outbound(
    connection_id: ConnectionId,
    mut ws_sink: WsSink,
    mut outbound: UnboundedReceiver<Message>,
) {
    while let Some(frame) = outbound.recv().await {
        let closing = matches!(frame, Message::Close(_));
        if let Err(e) = ws_sink.send(frame).await {
            debug!("Send to {} failed: {}", connection_id, e);
            return;
        }
        if closing {
            return;
        }
    }
    if let Err(e) = ws_sink.close().await {
        debug!("Close of {} failed: {}", connection_id, e);
    }
}

fn advance(state: &mut ConnectionState, next: ConnectionState, connection_id: Option<ConnectionId>) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal connection transition {state} -> {next}"
    );
    match connection_id {
        Some(id) => debug!("Connection {}: {} -> {}", id, state, next),
        None => debug!("Connection (unregistered): {} -> {}", state, next),
    }
    *state = next;
}
