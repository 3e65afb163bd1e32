mod core;
mod state;

pub use core::{cmd_once, cmd_run};
pub use state::{cmd_interval, cmd_reset, cmd_status};
