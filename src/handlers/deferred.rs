use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET /delay-async handler - Answer once a timer fires
///
/// The wait is a timer registered with the runtime, so the event loop keeps
/// serving other connections in the meantime. The body never carries a pid.
#[utoipa::path(
    get,
    path = routes::DELAY_ASYNC,
    responses(
        (status = 200, description = "Response after a non-blocking wait", body = String, content_type = "text/plain")
    ),
    tag = "examples"
)]
pub async fn delay_async_handler(State(state): State<AppState>) -> &'static str {
    tokio::time::sleep(state.config.delay).await;
    "Async delay example"
}
