use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::backend::{DirectoryLister, ImageSource};
use crate::interval::{Interval, IntervalBounds};
use crate::settings::{Settings, SettingsStore};

/// How far the current round has progressed through the pool
#[derive(Debug, PartialEq, Eq)]
struct Progress {
    pool: usize,
    shown: usize,
}

impl Progress {
    /// Only history entries still present in the pool count as shown.
    fn of(settings: &Settings, pool: &[PathBuf]) -> Self {
        let in_pool: HashSet<&PathBuf> = pool.iter().collect();
        let shown = settings
            .shown_paths
            .iter()
            .filter(|p| in_pool.contains(p))
            .collect::<HashSet<_>>()
            .len();
        Self {
            pool: pool.len(),
            shown,
        }
    }

    fn remaining(&self) -> usize {
        self.pool.saturating_sub(self.shown)
    }
}

pub fn cmd_status(store: &SettingsStore, dir: Option<&Path>, json: bool) -> Result<()> {
    let settings = store.load()?;
    let root = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.root_dir());
    let progress = DirectoryLister
        .list_images(&root)
        .map(|pool| Progress::of(&settings, &pool));
    let bounds = settings.bounds_or_default(store.path());

    if json {
        let progress = progress.as_ref().ok();
        let value = serde_json::json!({
            "settings_path": store.path(),
            "root_dir": root,
            "interval": { "min": bounds.min.to_string(), "max": bounds.max.to_string() },
            "backend": settings.backend.name(),
            "sound_enabled": settings.sound_enabled,
            "pool_size": progress.map(|p| p.pool),
            "shown": progress.map(|p| p.shown),
            "remaining": progress.map(Progress::remaining),
            "last_shown_path": settings.last_shown_path,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Settings:    {}", store.path().display());
    println!("Directory:   {}", root.display());
    println!(
        "Interval:    {} to {} ({}s to {}s)",
        bounds.min,
        bounds.max,
        bounds.min.as_duration().as_secs(),
        bounds.max.as_duration().as_secs()
    );
    println!(
        "Backend:     {} ({})",
        settings.backend.name(),
        settings
            .backend
            .resolve()
            .map_or("none detected", |kind| kind.name())
    );
    println!(
        "Sound:       {}",
        if settings.sound_enabled { "on" } else { "off" }
    );
    match &progress {
        Ok(p) => println!(
            "Shown:       {} of {} ({} remaining this round)",
            p.shown,
            p.pool,
            p.remaining()
        ),
        Err(e) => println!("Shown:       unknown ({e:#})"),
    }
    match &settings.last_shown_path {
        Some(path) => println!("Last shown:  {}", path.display()),
        None => println!("Last shown:  none"),
    }

    Ok(())
}

pub fn cmd_reset(store: &SettingsStore) -> Result<()> {
    let settings = store.load()?;
    let cleared = settings.shown_paths.len();
    store.save(&settings.with_cleared_history())?;

    tracing::info!(cleared, "rotation history reset");
    println!("Cleared {cleared} shown wallpaper(s).");
    Ok(())
}

pub fn cmd_interval(store: &SettingsStore, min: Interval, max: Interval) -> Result<()> {
    let bounds = IntervalBounds::new(min, max).map_err(anyhow::Error::msg)?;

    let mut settings = store.load()?;
    settings.interval = bounds;
    store.save(&settings)?;

    println!("Wallpaper changes every {} to {}.", bounds.min, bounds.max);
    println!("A running daemon picks this up after its next change.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalUnit;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/w/{name}.jpg"))
    }

    #[test]
    fn test_progress_ignores_deleted_history() {
        let settings = Settings {
            shown_paths: vec![p("a"), p("gone"), p("c")],
            ..Settings::default()
        };
        let progress = Progress::of(&settings, &[p("a"), p("b"), p("c"), p("d")]);
        assert_eq!(progress, Progress { pool: 4, shown: 2 });
        assert_eq!(progress.remaining(), 2);
    }

    #[test]
    fn test_reset_clears_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        let settings = Settings {
            shown_paths: vec![p("a"), p("b")],
            last_shown_path: Some(p("b")),
            ..Settings::default()
        };
        store.save(&settings).unwrap();

        cmd_reset(&store).unwrap();
        let saved = store.load().unwrap();
        assert!(saved.shown_paths.is_empty());
        assert_eq!(saved.last_shown_path, Some(p("b")));
    }

    #[test]
    fn test_interval_rejects_inverted_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));

        let err = cmd_interval(
            &store,
            Interval::new(2, IntervalUnit::Hours),
            Interval::new(30, IntervalUnit::Minutes),
        );
        assert!(err.is_err());
        assert!(!store.path().exists(), "nothing written on bad input");

        cmd_interval(
            &store,
            Interval::new(30, IntervalUnit::Seconds),
            Interval::new(2, IntervalUnit::Hours),
        )
        .unwrap();
        assert_eq!(
            store.load().unwrap().interval.max,
            Interval::new(2, IntervalUnit::Hours)
        );
    }
}
