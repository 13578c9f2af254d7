//! HTTP server implementation

use super::api::build_router;
use super::state::AppState;
use crate::shutdown::ShutdownCoordinator;
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Contact API server
pub struct ContactServer {
    state: Arc<AppState>,
    addr: SocketAddr,
}

impl ContactServer {
    /// Create a new server for `state`, to listen on `addr`
    pub fn new(state: AppState, addr: SocketAddr) -> Self {
        Self {
            state: Arc::new(state),
            addr,
        }
    }

    /// Bind, then serve until `shutdown` fires
    pub async fn run(self, shutdown: Arc<ShutdownCoordinator>) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        info!("Contact API listening on http://{}", listener.local_addr()?);

        serve(listener, self.state, shutdown).await
    }
}

/// Serve the API on an already bound listener
///
/// In-flight requests are allowed to finish once shutdown is requested.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownCoordinator>,
) -> Result<()> {
    let router = build_router(state);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
    .await?;

    info!("Contact API stopped");
    Ok(())
}
