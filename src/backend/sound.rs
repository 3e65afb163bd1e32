//! Change chime
//!
//! A short arpeggio of random notes read from a directory of `.wav` clips,
//! played through the platform's command-line audio player.

use super::SoundEffect;
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

const NOTE_COUNT: RangeInclusive<usize> = 5..=9;
const NOTE_GAP: Duration = Duration::from_millis(50);
/// Upper bound on how long an arpeggio takes to start all its notes
pub const ARPEGGIO_MAX: Duration = Duration::from_millis(50 * 9 + 50);

/// Sound disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundEffect for Silent {
    fn play(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Arpeggiator {
    notes_dir: PathBuf,
}

impl Arpeggiator {
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
        }
    }

    fn notes(&self) -> Result<Vec<PathBuf>> {
        let mut notes: Vec<PathBuf> = fs::read_dir(&self.notes_dir)
            .with_context(|| format!("Failed to read sound directory: {}", self.notes_dir.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
            })
            .collect();
        notes.sort();
        Ok(notes)
    }

    /// Random run of notes to play, between 5 and 9 long.
    fn sequence<R: Rng + ?Sized>(notes: &[PathBuf], rng: &mut R) -> Vec<PathBuf> {
        if notes.is_empty() {
            return Vec::new();
        }
        let count = rng.gen_range(NOTE_COUNT);
        (0..count)
            .filter_map(|_| notes.choose(rng).cloned())
            .collect()
    }
}

impl SoundEffect for Arpeggiator {
    fn play(&self) -> Result<()> {
        let notes = self.notes()?;
        if notes.is_empty() {
            anyhow::bail!("no .wav files in {}", self.notes_dir.display());
        }

        let sequence = Self::sequence(&notes, &mut rand::thread_rng());
        let handle = tokio::runtime::Handle::try_current()
            .context("sound playback needs a tokio runtime")?;
        tracing::debug!(notes = sequence.len(), "playing arpeggio");

        handle.spawn(async move {
            for note in sequence {
                if let Err(e) = play_clip(&note) {
                    tracing::warn!(error = %e, clip = %note.display(), "sound clip failed");
                    break;
                }
                tokio::time::sleep(NOTE_GAP).await;
            }
        });

        Ok(())
    }
}

fn play_clip(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut cmd = tokio::process::Command::new("afplay");
        cmd.arg(path);
        cmd
    };
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let script = format!(
            "(New-Object Media.SoundPlayer '{}').PlaySync()",
            path.to_string_lossy().replace('\'', "''")
        );
        let mut cmd = tokio::process::Command::new("powershell");
        cmd.args(["-Command", script.as_str()]);
        cmd
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut cmd = {
        let mut cmd = tokio::process::Command::new("aplay");
        cmd.arg("-q").arg(path);
        cmd
    };

    cmd.stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .context("Failed to start audio player")?;
    Ok(())
}
