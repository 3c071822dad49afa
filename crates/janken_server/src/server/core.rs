//! Core game server implementation.
//!
//! This module contains the `GameServer` struct, which binds the listener,
//! accepts WebSocket connections and spawns one handler task per
//! connection.

use crate::config::ServerConfig;
use crate::context::ServerContext;
use crate::error::ServerError;
use crate::npc::NpcMoveProvider;
use crate::server::handlers::handle_connection;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

/// The Janken Hub server.
///
/// Each accepted connection is served by its own task, which processes the
/// connection's messages one at a time. Tasks for different connections run
/// concurrently and share state only through the [`ServerContext`].
pub struct GameServer {
    context: Arc<ServerContext>,
}

impl GameServer {
    /// Creates a server with a random NPC opponent.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_context(ServerContext::new(config))
    }

    /// Creates a server whose NPC moves come from `npc`.
    pub fn with_npc(config: ServerConfig, npc: Arc<dyn NpcMoveProvider>) -> Self {
        Self::with_context(ServerContext::with_npc(config, npc))
    }

    pub fn with_context(context: ServerContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    pub fn context(&self) -> &Arc<ServerContext> {
        &self.context
    }

    /// Binds the configured address and serves until shutdown.
    ///
    /// # Errors
    ///
    /// `ServerError::Config` for an invalid configuration and
    /// `ServerError::Network` if binding fails.
    pub async fn start(&self) -> Result<(), ServerError> {
        self.context.config().validate()?;

        let addr = self.context.config().bind_address;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Network(format!("Failed to bind to {addr}: {e}")))?;

        self.serve(listener).await
    }

    /// Runs the accept loop on an already bound listener until
    /// [`GameServer::shutdown`] is called.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Network(format!("Failed to read listener address: {e}")))?;
        info!("🎮 Janken Hub listening on ws://{}", local_addr);

        let mut shutdown_rx = self.context.shutdown_signal();

        loop {
            if *shutdown_rx.borrow_and_update() {
                info!("Shutdown signal received, stopping accept loop");
                break;
            }

            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => self.accept(stream, addr),
                        Err(e) => error!("Failed to accept connection: {}", e),
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Spawns a handler for `stream` if a connection slot is free.
    ///
    /// The slot is reserved before the handshake and released when the
    /// handler task ends.
    fn accept(&self, stream: TcpStream, addr: SocketAddr) {
        let slot = match self.context.connection_slots().clone().try_acquire_owned() {
            Ok(slot) => slot,
            Err(_) => {
                warn!(
                    "Refusing connection from {}: limit of {} connections reached",
                    addr,
                    self.context.config().max_connections
                );
                return;
            }
        };

        let context = self.context.clone();
        tokio::spawn(async move {
            handle_connection(stream, addr, context, slot).await;
        });
    }

    /// Stops the accept loop and every connection task, then closes the
    /// remaining connections and drops all sessions.
    ///
    /// Connection tasks also evict their own sessions as they exit, which
    /// covers a frame that was mid-dispatch when the signal fired.
    pub async fn shutdown(&self) -> Result<(), ServerError> {
        info!("Shutting down Janken Hub...");
        self.context.signal_shutdown();
        self.context.connections().shutdown_all();
        self.context.sessions().store().clear();
        info!("Janken Hub shutdown complete");
        Ok(())
    }
}
