//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;

use crate::state::AppState;

/// 200 when MongoDB answers a ping, 503 otherwise
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let mongodb: HealthCheckFuture<'_> =
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("mongodb", mongodb)]).await
}

/// Router serving `/ready`
pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
