use axum::http::StatusCode;

/// Fallback for unknown paths and non-GET methods on known paths
pub async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
