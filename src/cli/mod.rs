mod args;
mod runner;

pub(crate) use args::{Cli, Commands};
pub(crate) use runner::run;
