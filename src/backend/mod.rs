//! Collaborators the scheduler talks to: where images come from, how a
//! wallpaper gets painted, and the optional chime after a change.

mod gnome;
mod lister;
mod macos;
mod sound;
mod swww;
mod windows;

pub use gnome::GnomeSetter;
pub use lister::DirectoryLister;
pub use macos::MacosSetter;
pub use sound::{Arpeggiator, Silent, ARPEGGIO_MAX};
pub use swww::SwwwSetter;
pub use windows::WindowsSetter;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paints an image onto the desktop
pub trait WallpaperSetter: Send + Sync {
    fn set_wallpaper(&self, path: &Path) -> Result<()>;
}

/// Enumerates the candidate pool
pub trait ImageSource: Send + Sync {
    /// Absolute paths of eligible images in `root`, sorted and deduplicated.
    fn list_images(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Fire-and-forget notification after a successful change
pub trait SoundEffect: Send + Sync {
    fn play(&self) -> Result<()>;
}

/// Accepts every request without touching the desktop
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSetter;

impl WallpaperSetter for NoopSetter {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "noop backend: wallpaper not painted");
        Ok(())
    }
}

/// Stands in for `auto` when the session matches no backend.
///
/// Every change fails, so the cycle is skipped and history does not advance
/// while nothing is painted.
#[derive(Debug, Default, Clone, Copy)]
pub struct UndetectedSetter;

impl WallpaperSetter for UndetectedSetter {
    fn set_wallpaper(&self, _path: &Path) -> Result<()> {
        anyhow::bail!("no wallpaper backend detected for this session; set `backend` in the settings file")
    }
}

/// Which wallpaper setter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Detect from the platform and session environment
    #[default]
    Auto,
    Swww,
    Gnome,
    Windows,
    Macos,
    Noop,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Auto => "auto",
            BackendKind::Swww => "swww",
            BackendKind::Gnome => "gnome",
            BackendKind::Windows => "windows",
            BackendKind::Macos => "macos",
            BackendKind::Noop => "noop",
        }
    }

    /// Resolve `Auto` against the current session; other kinds pass through.
    /// `None` means nothing was detected.
    pub fn resolve(self) -> Option<Self> {
        if self != BackendKind::Auto {
            return Some(self);
        }

        let desktop = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
        let detected = Self::detect(
            std::env::consts::OS,
            &desktop,
            std::env::var_os("WAYLAND_DISPLAY").is_some(),
        );
        if detected.is_none() {
            tracing::warn!("no wallpaper backend detected, changes will be skipped");
        }
        detected
    }

    fn detect(os: &str, current_desktop: &str, wayland: bool) -> Option<Self> {
        match os {
            "windows" => return Some(BackendKind::Windows),
            "macos" => return Some(BackendKind::Macos),
            _ => {}
        }

        let is_gnome = current_desktop
            .split(':')
            .any(|d| d.eq_ignore_ascii_case("gnome") || d.eq_ignore_ascii_case("ubuntu"));

        if is_gnome {
            Some(BackendKind::Gnome)
        } else if wayland {
            Some(BackendKind::Swww)
        } else {
            None
        }
    }

    pub fn build(self) -> Box<dyn WallpaperSetter> {
        match self.resolve() {
            Some(BackendKind::Swww) => Box::new(SwwwSetter::default()),
            Some(BackendKind::Gnome) => Box::new(GnomeSetter),
            Some(BackendKind::Windows) => Box::new(WindowsSetter),
            Some(BackendKind::Macos) => Box::new(MacosSetter),
            Some(BackendKind::Noop) => Box::new(NoopSetter),
            Some(BackendKind::Auto) | None => Box::new(UndetectedSetter),
        }
    }
}
