use crate::routes;
use crate::state::AppState;
use axum::extract::State;
use std::time::{Duration, Instant};

/// Hold the calling thread for `duration` without ever yielding.
///
/// This is CPU work, not I/O: on a single-threaded runtime nothing else
/// runs until it returns.
pub fn busy_wait(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        std::hint::spin_loop();
    }
}

/// GET /delay handler - Block the event loop, then answer
#[utoipa::path(
    get,
    path = routes::DELAY,
    responses(
        (status = 200, description = "Response after blocking the serving thread", body = String, content_type = "text/plain")
    ),
    tag = "examples"
)]
pub async fn delay_handler(State(state): State<AppState>) -> String {
    busy_wait(state.config.delay);
    state.tagged("Delay example")
}

/// GET /timer handler - Same busy-wait as `/delay` under another name
#[utoipa::path(
    get,
    path = routes::TIMER,
    responses(
        (status = 200, description = "Response after blocking the serving thread", body = String, content_type = "text/plain")
    ),
    tag = "examples"
)]
pub async fn timer_handler(State(state): State<AppState>) -> String {
    busy_wait(state.config.delay);
    "Timer example".to_string()
}
