use crate::interval::Interval;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wally")]
#[command(author = "Jarad Gray")]
#[command(version)]
#[command(about = "Background wallpaper rotator that never repeats an image until all are shown")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Wallpaper directory, overriding the one in the settings file
    #[arg(short, long, global = true)]
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Rotate wallpapers until interrupted (default)
    Run {
        /// Change the wallpaper right away instead of waiting first
        #[arg(short, long)]
        now: bool,
    },
    /// Change the wallpaper once and exit
    Once,
    /// Show rotation progress and settings
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget which wallpapers have been shown
    Reset,
    /// Set the random delay range between changes
    Interval {
        /// Shortest delay (e.g. "90s", "1m")
        min: Interval,
        /// Longest delay (e.g. "3h", "1d")
        max: Interval,
    },
}
