use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{services::entries::EntryService, AppState};

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let count = match state.db.acquire().await {
        Ok(mut conn) => EntryService::count(&mut conn).await,
        Err(e) => Err(e),
    };

    match count {
        Ok(entries) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "db": "connected", "entries": entries })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "db": e.to_string() })),
        ),
    }
}
