pub mod home;
pub mod blocking;
pub mod deferred;
pub mod fallback;

pub use home::home_handler;
pub use blocking::{delay_handler, timer_handler};
pub use deferred::delay_async_handler;
pub use fallback::not_found_handler;
