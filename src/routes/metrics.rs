use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use prometheus::{Encoder, TextEncoder};

use crate::services::metrics::{ENTRY_WRITES_COUNTER, HTTP_REQUESTS_COUNTER};

/// GET /metrics — Prometheus text exposition
pub async fn metrics_handler() -> Result<impl IntoResponse, StatusCode> {
    // Touch the statics so the families are registered before the first scrape.
    lazy_static::initialize(&HTTP_REQUESTS_COUNTER);
    lazy_static::initialize(&ENTRY_WRITES_COUNTER);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer).map_err(|e| {
        tracing::error!("metrics encoding failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], buffer))
}
