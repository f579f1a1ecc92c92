//! # HTTP Print Listener
//!
//! Accepts invoice print jobs over HTTP and delivers them to the
//! configured printer.
//!
//! ## Usage
//!
//! ```bash
//! rasid listen "EPSON TM-T82" --port 35625 --secret s3cret
//! ```
//!
//! ```text
//! POST /print-escpos
//! {"secret_key": "s3cret", "invoice": {"id": 518, ...}}
//!
//! 200 {"success": true, "bytes": 1234}
//! 401 {"success": false, "error": "invalid secret key"}
//! 502 {"success": false, "error": "Print failed: ..."}
//! ```

mod handlers;
mod state;

pub use state::{AppState, DEFAULT_PORT, ServerConfig};

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::delivery::Deliverer;
use crate::error::RasidError;
use crate::receipt::ShopProfile;
use crate::spooler::Spooler;

/// Build the application router.
pub fn router<S>(state: Arc<AppState<S>>) -> Router
where
    S: Spooler + Send + Sync + 'static,
{
    Router::new()
        .route("/print-escpos", post(handlers::print::print_escpos::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use rasid::delivery::{Deliverer, DeliveryConfig};
/// use rasid::receipt::ShopProfile;
/// use rasid::server::{serve, ServerConfig};
/// use rasid::spooler::SystemSpooler;
///
/// # async fn example() -> Result<(), rasid::RasidError> {
/// let deliverer = Deliverer::new(SystemSpooler::default(), DeliveryConfig::new("EPSON TM-T82"));
/// serve(ServerConfig::new("s3cret"), deliverer, ShopProfile::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve<S>(
    config: ServerConfig,
    deliverer: Deliverer<S>,
    profile: ShopProfile,
) -> Result<(), RasidError>
where
    S: Spooler + Send + Sync + 'static,
{
    let listen_addr = config.listen_addr.clone();
    let printer = deliverer.config().printer.clone();
    let app = router(Arc::new(AppState::new(config, profile, deliverer)));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| RasidError::Config(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    info!(listen = %listen_addr, printer = %printer, "print listener started");

    axum::serve(listener, app).await?;

    Ok(())
}
