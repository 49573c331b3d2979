// Route path constants - single source of truth for all served paths

pub const HOME: &str = "/";
pub const DELAY: &str = "/delay";
pub const DELAY_ASYNC: &str = "/delay-async";
pub const TIMER: &str = "/timer";
