use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::errors::AppError;
use crate::models::{SessionEvent, TurnSnapshot};
use crate::services::session::StartTrigger;
use crate::state::AppState;

// POST /api/session/start
pub async fn start_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    state
        .triggers
        .send(StartTrigger)
        .await
        .map_err(|_| AppError::SessionUnavailable)?;

    tracing::info!(turn = state.turn_rx.borrow().turn, "start trigger received");

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "accepted": true })),
    ))
}

// GET /api/session/turn
pub async fn current_turn(State(state): State<Arc<AppState>>) -> Json<TurnSnapshot> {
    let snapshot = state.turn_rx.borrow().clone();
    Json(snapshot)
}

// GET /api/session/events (SSE)
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let current = state.turn_rx.borrow().clone();
    let rx = state.events_tx.subscribe();

    let first = tokio_stream::once(Ok::<_, Infallible>(to_sse(&SessionEvent::TurnChanged {
        turn: current.turn,
        phase: current.phase,
    })));

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(to_sse(&event))),
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "session event subscriber lagged");
            None
        }
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = first.chain(live_stream);
    let merged = StreamExt::merge(combined, keepalive_stream);

    Sse::new(merged)
}

fn to_sse(event: &SessionEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_default();
    Event::default().data(data).event(event.name())
}
