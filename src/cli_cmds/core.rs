use anyhow::Result;
use std::path::PathBuf;

use crate::backend::ARPEGGIO_MAX;
use crate::error::RotationError;
use crate::scheduler::{CycleOutcome, Scheduler};
use crate::settings::SettingsStore;

pub async fn cmd_run(store: SettingsStore, dir: Option<PathBuf>, now: bool) -> Result<()> {
    tracing::info!(
        settings = %store.path().display(),
        dir = ?dir,
        "wally starting"
    );

    let mut scheduler = Scheduler::new(store).with_root(dir).change_now(now);
    scheduler
        .start(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "cannot listen for Ctrl+C, running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await;

    tracing::info!("wally stopped");
    Ok(())
}

pub async fn cmd_once(store: SettingsStore, dir: Option<PathBuf>) -> Result<()> {
    let sound_enabled = store.load().map(|s| s.sound_enabled).unwrap_or(false);
    let mut scheduler = Scheduler::new(store).with_root(dir);

    match scheduler.run_cycle_blocking() {
        CycleOutcome::Changed { path, did_reset } => {
            if did_reset {
                println!("Every wallpaper has been shown, starting a new round.");
            }
            println!("{}", path.display());
            if sound_enabled {
                // Let the chime finish before the runtime shuts down.
                tokio::time::sleep(ARPEGGIO_MAX).await;
            }
            Ok(())
        }
        CycleOutcome::Skipped(RotationError::NoCandidates { root }) => {
            eprintln!("No wallpapers found in: {}", root.display());
            eprintln!("Set root_dir in the settings file or pass --dir.");
            Ok(())
        }
        CycleOutcome::Skipped(e) => Err(e.into()),
    }
}
