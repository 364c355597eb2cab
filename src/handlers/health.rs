use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "habitrix-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Nothing external to probe; reports the limits requests are held to.
pub async fn readyz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ready",
        "limits": {
            "maxHabits": state.config.max_habits,
            "maxBodyBytes": state.config.max_body_bytes,
        },
    }))
}
