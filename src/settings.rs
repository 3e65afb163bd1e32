use crate::backend::BackendKind;
use crate::error::RotationError;
use crate::interval::IntervalBounds;
use crate::selection::Selection;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted settings record.
///
/// Holds both user configuration (root directory, interval, backend, sound)
/// and rotation state (shown paths, last shown path). The whole record is
/// rewritten on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub root_dir: PathBuf,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub sound_enabled: bool,
    /// Directory of `.wav` clips played after a change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_shown_path: Option<PathBuf>,
    /// Shown since the last reset, in display order
    #[serde(default)]
    pub shown_paths: Vec<PathBuf>,
    #[serde(default)]
    pub interval: IntervalBounds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_dir: dirs::picture_dir()
                .map(|p| p.join("wallpapers"))
                .unwrap_or_else(|| PathBuf::from("~/Pictures/wallpapers")),
            backend: BackendKind::default(),
            sound_enabled: false,
            sound_dir: None,
            last_shown_path: None,
            shown_paths: Vec::new(),
            interval: IntervalBounds::default(),
        }
    }
}

impl Settings {
    /// Root directory with `~` expanded.
    pub fn root_dir(&self) -> PathBuf {
        crate::utils::expand_tilde(&self.root_dir)
    }

    /// Apply a selection: record the new shown set and last shown path.
    pub fn with_selection(mut self, selection: &Selection) -> Self {
        self.shown_paths = selection.shown.clone();
        self.last_shown_path = Some(selection.chosen.clone());
        self
    }

    /// Forget rotation history, keeping the path on screen.
    pub fn with_cleared_history(mut self) -> Self {
        self.shown_paths.clear();
        self
    }

    /// Interval bounds, falling back to defaults when the stored pair is invalid.
    pub fn bounds_or_default(&self, path: &Path) -> IntervalBounds {
        match self.interval.validate() {
            Ok(()) => self.interval,
            Err(reason) => {
                let err = RotationError::InvalidSettings {
                    path: path.to_path_buf(),
                    reason,
                };
                tracing::warn!(error = %err, "using default interval bounds");
                IntervalBounds::default()
            }
        }
    }
}

/// Reads and writes the settings record at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform default location of `settings.toml`.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "jaradgray", "wally")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("settings.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, creating it with defaults if it does not exist yet.
    pub fn load(&self) -> Result<Settings, RotationError> {
        if !self.path.exists() {
            let settings = Settings::default();
            if let Err(e) = self.save(&settings) {
                tracing::warn!(error = %e, "could not write default settings");
            } else {
                tracing::info!(path = %self.path.display(), "created default settings");
            }
            return Ok(settings);
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
            .map_err(|source| self.persistence(source))?;

        toml::from_str::<Settings>(&data)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
            .map_err(|source| self.persistence(source))
    }

    /// Replace the record on disk in one step (temp file, then rename).
    pub fn save(&self, settings: &Settings) -> Result<(), RotationError> {
        self.write_atomic(settings)
            .map_err(|source| self.persistence(source))
    }

    fn write_atomic(&self, settings: &Settings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data).with_context(|| format!("Failed to write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("Failed to replace {}", self.path.display()));
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "settings.toml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persistence(&self, source: anyhow::Error) -> RotationError {
        RotationError::Persistence {
            path: self.path.clone(),
            source,
        }
    }
}
