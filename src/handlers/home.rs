use crate::routes;
use crate::state::AppState;
use axum::extract::State;

/// GET / handler - Answer immediately
///
/// In the cluster variant the body carries the pid of the replica that
/// served the request.
#[utoipa::path(
    get,
    path = routes::HOME,
    responses(
        (status = 200, description = "Immediate response", body = String, content_type = "text/plain")
    ),
    tag = "examples"
)]
pub async fn home_handler(State(state): State<AppState>) -> String {
    state.tagged("Performance example")
}
