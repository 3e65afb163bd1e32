//! Rotation loop
//!
//! One timer, one cycle at a time: wait a random delay inside the configured
//! interval, pick the next wallpaper, paint it, persist the history, repeat.
//! Every failure inside a cycle is logged and the loop simply re-arms.

use crate::backend::{
    Arpeggiator, DirectoryLister, ImageSource, Silent, SoundEffect, WallpaperSetter,
};
use crate::error::RotationError;
use crate::selection::select_next;
use crate::settings::{Settings, SettingsStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No timer armed
    Idle,
    /// Timer armed for `delay`
    Waiting { delay: Duration },
    /// Running a cycle to completion
    Executing,
}

/// Result of a single cycle
#[derive(Debug)]
pub enum CycleOutcome {
    Changed { path: PathBuf, did_reset: bool },
    Skipped(RotationError),
}

pub struct Scheduler {
    store: SettingsStore,
    source: Box<dyn ImageSource>,
    setter: Box<dyn WallpaperSetter>,
    sound: Box<dyn SoundEffect>,
    /// Directory `sound` plays from
    sound_dir: Option<PathBuf>,
    root_override: Option<PathBuf>,
    snapshot: Settings,
    rng: StdRng,
    state: SchedulerState,
    change_now: bool,
}

impl Scheduler {
    /// Build a scheduler with the backends named in the settings record.
    pub fn new(store: SettingsStore) -> Self {
        let snapshot = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e.chain(), "starting from default settings");
            Settings::default()
        });

        Self {
            setter: snapshot.backend.build(),
            source: Box::new(DirectoryLister),
            sound: sound_for(snapshot.sound_dir.as_deref()),
            sound_dir: snapshot.sound_dir.clone(),
            store,
            root_override: None,
            snapshot,
            rng: StdRng::from_entropy(),
            state: SchedulerState::Idle,
            change_now: false,
        }
    }

    /// Use `root` instead of the stored root directory.
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root_override = root;
        self
    }

    /// Change the wallpaper once before the first wait.
    pub fn change_now(mut self, now: bool) -> Self {
        self.change_now = now;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Run until `shutdown` resolves.
    ///
    /// Shutdown is only observed while waiting; a cycle that has started
    /// always finishes, persistence included.
    pub async fn start<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        if self.change_now {
            self.execute();
        }

        loop {
            let delay = self.next_delay();
            self.state = SchedulerState::Waiting { delay };
            let at = chrono::Local::now()
                + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());
            tracing::info!(
                delay_secs = delay.as_secs(),
                next_change = %at.format("%Y-%m-%d %H:%M:%S"),
                "next wallpaper change scheduled"
            );

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested, no further changes scheduled");
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            self.execute();
        }

        self.state = SchedulerState::Idle;
    }

    fn execute(&mut self) {
        self.state = SchedulerState::Executing;
        match self.run_cycle_blocking() {
            CycleOutcome::Changed { .. } => {}
            CycleOutcome::Skipped(RotationError::NoCandidates { root }) => {
                tracing::info!(root = %root.display(), "no images to rotate, keeping current wallpaper");
            }
            CycleOutcome::Skipped(e) => {
                tracing::warn!(error = %e.chain(), "cycle skipped");
            }
        }
    }

    /// [`run_cycle`](Self::run_cycle) with the backend calls moved off the
    /// async worker thread when the runtime allows it.
    pub fn run_cycle_blocking(&mut self) -> CycleOutcome {
        use tokio::runtime::{Handle, RuntimeFlavor};

        match Handle::try_current().map(|h| h.runtime_flavor()) {
            Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(|| self.run_cycle()),
            _ => self.run_cycle(),
        }
    }

    /// One full cycle: load, list, select, apply, persist.
    ///
    /// When the record cannot be loaded the cycle runs on the in-memory
    /// snapshot and nothing is written back, so the file stays as it was.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let (settings, persist) = match self.store.load() {
            Ok(settings) => {
                self.snapshot = settings.clone();
                (settings, true)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e.chain(),
                    "using in-memory settings for this cycle, record left untouched"
                );
                (self.snapshot.clone(), false)
            }
        };
        self.refresh_sound(settings.sound_dir.as_deref());

        let root = self
            .root_override
            .clone()
            .unwrap_or_else(|| settings.root_dir());

        let pool = match self.source.list_images(&root) {
            Ok(pool) => pool,
            Err(e) => return CycleOutcome::Skipped(RotationError::external("image listing", e)),
        };

        let selection = match select_next(
            &pool,
            &settings.shown_paths,
            settings.last_shown_path.as_deref(),
            &root,
            &mut self.rng,
        ) {
            Ok(selection) => selection,
            Err(e) => return CycleOutcome::Skipped(e),
        };

        tracing::debug!(
            pool = pool.len(),
            shown = selection.shown.len(),
            reset = selection.did_reset,
            "selected {}",
            selection.chosen.display()
        );

        if let Err(e) = self.setter.set_wallpaper(&selection.chosen) {
            return CycleOutcome::Skipped(RotationError::external("wallpaper setter", e));
        }
        tracing::info!(
            path = %selection.chosen.display(),
            reset = selection.did_reset,
            "changed wallpaper"
        );

        let updated = settings.with_selection(&selection);
        if persist {
            if let Err(e) = self.store.save(&updated) {
                tracing::warn!(error = %e.chain(), "rotation history kept in memory only");
            }
        }
        self.snapshot = updated;

        if self.snapshot.sound_enabled {
            if let Err(e) = self.sound.play() {
                let err = RotationError::external("sound effect", e);
                tracing::warn!(error = %err.chain(), "no change chime");
            }
        }

        CycleOutcome::Changed {
            path: selection.chosen,
            did_reset: selection.did_reset,
        }
    }

    /// Rebuild the chime when the configured sound directory changed.
    fn refresh_sound(&mut self, dir: Option<&Path>) {
        if self.sound_dir.as_deref() == dir {
            return;
        }
        tracing::debug!(dir = ?dir, "sound directory changed");
        self.sound = sound_for(dir);
        self.sound_dir = dir.map(Path::to_path_buf);
    }

    fn next_delay(&mut self) -> Duration {
        self.snapshot
            .bounds_or_default(self.store.path())
            .draw_delay(&mut self.rng)
    }
}

fn sound_for(dir: Option<&Path>) -> Box<dyn SoundEffect> {
    match dir {
        Some(dir) => Box::new(Arpeggiator::new(crate::utils::expand_tilde(dir))),
        None => Box::new(Silent),
    }
}

#[cfg(test)]
impl Scheduler {
    pub fn with_setter(mut self, setter: impl WallpaperSetter + 'static) -> Self {
        self.setter = Box::new(setter);
        self
    }

    pub fn with_source(mut self, source: impl ImageSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_sound(mut self, sound: impl SoundEffect + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }
}
