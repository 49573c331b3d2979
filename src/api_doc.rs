use utoipa::OpenApi;

use crate::handlers;
use crate::variant::Variant;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "perf-example API",
        version = "0.1.0",
        description = "Blocking versus non-blocking delays on a single-threaded HTTP server"
    ),
    paths(
        handlers::home::home_handler,
        handlers::blocking::delay_handler,
        handlers::blocking::timer_handler,
        handlers::deferred::delay_async_handler
    ),
    tags(
        (name = "examples", description = "Immediate and delayed responses")
    )
)]
pub struct ApiDoc;

/// The document restricted to the paths `variant` actually serves.
pub fn for_variant(variant: Variant) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let served = variant.paths();
    doc.paths.paths.retain(|path, _| served.contains(&path.as_str()));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_of(variant: Variant) -> Vec<String> {
        for_variant(variant).paths.paths.keys().cloned().collect()
    }

    #[test]
    fn test_basic_paths() {
        let paths = paths_of(Variant::Basic);
        assert_eq!(paths.len(), 3);
        assert!(paths.contains(&"/delay-async".to_string()));
        assert!(!paths.contains(&"/timer".to_string()));
    }

    #[test]
    fn test_timer_paths() {
        let paths = paths_of(Variant::Timer);
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&"/".to_string()));
        assert!(paths.contains(&"/timer".to_string()));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(for_variant(Variant::Cluster)).unwrap();
        assert_eq!(json["info"]["title"], "perf-example API");
        assert!(json["paths"]["/delay"]["get"].is_object());
    }
}
