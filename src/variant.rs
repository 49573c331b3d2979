use crate::routes;

/// Which flavour of the demo server to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// `/`, `/delay` and `/delay-async` on a single process
    Basic,
    /// `/` and `/timer` on a single process
    Timer,
    /// `/`, `/delay` and `/delay-async` replicated across one process per CPU
    Cluster,
}

impl Variant {
    /// Paths served by this variant, in registration order.
    pub fn paths(self) -> &'static [&'static str] {
        match self {
            Variant::Basic | Variant::Cluster => &[routes::HOME, routes::DELAY, routes::DELAY_ASYNC],
            Variant::Timer => &[routes::HOME, routes::TIMER],
        }
    }

    /// Whether response bodies name the process that served them.
    pub fn tags_pid(self) -> bool {
        matches!(self, Variant::Cluster)
    }
}
