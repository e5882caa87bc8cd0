//! tally-console
//!
//! Runs the admin console (and the ops HTTP surface when configured) over a
//! fresh aggregate store. Usage: `tally-console [config.yaml]`.

use std::future::IntoFuture;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use tally_console::{config, router, ConsoleServer, ConsoleState};
use tally_core::error::{Result, TallyError};
use tally_core::AggregateStore;

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "tally-console stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1);
    let cfg = config::load(path.as_deref())?;

    let ops_addr = cfg.ops.as_ref().map(|o| o.addr()).transpose()?;
    let console_addr = cfg.console.listen.clone();

    let state = ConsoleState::new(cfg, AggregateStore::new())?;
    let server = ConsoleServer::new(state.clone());
    let listener = ConsoleServer::bind(&console_addr).await?;
    let console = server.serve_with_shutdown(listener, shutdown_signal());

    let Some(ops_addr) = ops_addr else {
        return console.await;
    };

    let ops_listener = tokio::net::TcpListener::bind(ops_addr)
        .await
        .map_err(|source| TallyError::Bind { addr: ops_addr.to_string(), source })?;
    tracing::info!(%ops_addr, "ops endpoint listening");
    let ops = axum::serve(ops_listener, router::build_ops_router(state)).into_future();

    tokio::select! {
        res = console => res,
        res = ops => res.map_err(TallyError::Io),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, shutting down");
}
