use crate::config::Config;
use crate::variant::Variant;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub variant: Variant,
    pub pid: u32,
}

impl AppState {
    pub fn new(config: Config, variant: Variant) -> Self {
        AppState {
            config: Arc::new(config),
            variant,
            pid: std::process::id(),
        }
    }

    /// Append the serving pid to `body` when the variant reports it.
    pub fn tagged(&self, body: &str) -> String {
        if self.variant.tags_pid() {
            format!("{}: {}", body, self.pid)
        } else {
            body.to_string()
        }
    }
}
