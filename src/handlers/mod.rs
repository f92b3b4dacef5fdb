pub mod appointments;
pub mod health;
pub mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/session/start", post(session::start_session))
        .route("/api/session/turn", get(session::current_turn))
        .route("/api/session/events", get(session::events_stream))
        .route("/api/appointments", get(appointments::list_appointments))
        .route("/api/appointments/:id", get(appointments::get_appointment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
