//! Invoice printing handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{invoice::PrintJob, receipt, spooler::Spooler};

use super::super::state::AppState;

/// Handle POST /print-escpos - encode the invoice and print it.
pub async fn print_escpos<S>(
    State(state): State<Arc<AppState<S>>>,
    Json(job): Json<PrintJob>,
) -> Response
where
    S: Spooler + Send + Sync + 'static,
{
    let invoice_id = job.invoice.id;

    if !state.config.secret_matches(&job.secret_key) {
        warn!(invoice = invoice_id, "rejected print request: invalid secret key");
        return error_response(StatusCode::UNAUTHORIZED, "invalid secret key");
    }

    let buffer = receipt::encode(&job.invoice, &state.profile);

    // Spooler calls block; run them off the async runtime
    let print_result =
        tokio::task::spawn_blocking(move || state.deliverer.deliver(&buffer)).await;

    match print_result {
        Ok(Ok(report)) => {
            info!(
                invoice = invoice_id,
                bytes = report.bytes_written,
                "invoice printed"
            );
            (
                StatusCode::OK,
                Json(json!({"success": true, "bytes": report.bytes_written})),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            error!(invoice = invoice_id, error = %e, "print failed");
            error_response(StatusCode::BAD_GATEWAY, &format!("Print failed: {}", e))
        }
        Err(e) => {
            error!(invoice = invoice_id, error = %e, "print task failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Task error: {}", e),
            )
        }
    }
}

fn error_response(status: StatusCode, error_msg: &str) -> Response {
    (status, Json(json!({"success": false, "error": error_msg}))).into_response()
}
