//! Console listener and accept loop.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;

use tally_core::error::{Result, TallyError};

use crate::app_state::ConsoleState;
use crate::config::DEFAULT_CONSOLE_ADDR;
use crate::transport::session::run_session;

/// Normalise a configured listen address.
///
/// Empty means the default; a bare `:port` binds all interfaces.
pub fn resolve_listen_addr(addr: &str) -> String {
    let addr = addr.trim();
    if addr.is_empty() {
        DEFAULT_CONSOLE_ADDR.to_string()
    } else if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

pub struct ConsoleServer {
    state: ConsoleState,
}

impl ConsoleServer {
    pub fn new(state: ConsoleState) -> Self {
        Self { state }
    }

    /// Bind the console listener. Invalid or in-use addresses are `Bind`
    /// errors.
    pub async fn bind(addr: &str) -> Result<TcpListener> {
        let addr = resolve_listen_addr(addr);
        TcpListener::bind(addr.as_str())
            .await
            .map_err(|source| TallyError::Bind { addr, source })
    }

    /// Bind `addr` and serve until the listener fails.
    pub async fn listen_and_serve(&self, addr: &str) -> Result<()> {
        let listener = Self::bind(addr).await?;
        self.serve(listener).await
    }

    /// Accept loop. Returns only on an accept error.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        self.serve_with_shutdown(listener, std::future::pending()).await
    }

    /// Accept loop that also stops, with `Ok`, when `signal` resolves.
    /// Sessions already running are left to finish on their own.
    pub async fn serve_with_shutdown<F>(&self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if let Ok(local) = listener.local_addr() {
            tracing::info!(%local, "console listening");
        }
        tokio::pin!(signal);

        loop {
            tokio::select! {
                _ = &mut signal => {
                    tracing::info!("console accept loop stopping");
                    return Ok(());
                }
                accepted = listener.accept() => {
                    let (stream, peer) = accepted.map_err(|e| {
                        tracing::error!(error = %e, "console accept failed");
                        TallyError::Accept(e)
                    })?;
                    self.spawn_session(stream, peer);
                }
            }
        }
    }

    fn spawn_session(&self, stream: TcpStream, peer: SocketAddr) {
        let state = self.state.clone();
        let id = state.next_session_id();
        let span = tracing::info_span!("console_session", id, %peer);

        tokio::spawn(
            async move {
                let metrics = state.metrics();
                metrics.sessions_accepted.inc(&[]);
                metrics.sessions_active.inc(&[]);
                tracing::info!("session opened");

                match run_session(state.clone(), stream).await {
                    Ok(()) => tracing::info!("session closed"),
                    Err(e) => tracing::debug!(code = e.code().as_str(), error = %e, "session ended with error"),
                }

                state.metrics().sessions_active.dec(&[]);
            }
            .instrument(span),
        );
    }
}
