//! No-repeat selection
//!
//! Picks the next wallpaper from the candidate pool, skipping everything in
//! the shown set. Once the shown set covers the pool, history is reset and the
//! pick avoids the image currently on screen when there is any alternative.

use crate::error::RotationError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Outcome of one pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub chosen: PathBuf,
    /// Shown set to persist after applying `chosen`
    pub shown: Vec<PathBuf>,
    pub did_reset: bool,
}

/// Pick the next wallpaper.
///
/// `pool` is the current candidate pool, `shown` the insertion-ordered history
/// since the last reset. Returns [`RotationError::NoCandidates`] for an empty
/// pool, in which case nothing should be persisted.
pub fn select_next<R: Rng + ?Sized>(
    pool: &[PathBuf],
    shown: &[PathBuf],
    last_shown: Option<&Path>,
    root: &Path,
    rng: &mut R,
) -> Result<Selection, RotationError> {
    if pool.is_empty() {
        return Err(RotationError::NoCandidates {
            root: root.to_path_buf(),
        });
    }

    let unshown: Vec<&PathBuf> = if shown.is_empty() {
        pool.iter().collect()
    } else {
        let seen: HashSet<&Path> = shown.iter().map(PathBuf::as_path).collect();
        pool.iter().filter(|p| !seen.contains(p.as_path())).collect()
    };

    if let Some(chosen) = excluding_current(unshown, last_shown).choose(rng) {
        let chosen = (*chosen).clone();
        let mut next_shown = shown.to_vec();
        next_shown.push(chosen.clone());
        return Ok(Selection {
            chosen,
            shown: next_shown,
            did_reset: false,
        });
    }

    // Everything has been shown: start over, but not with what is on screen.
    let fresh = excluding_current(pool.iter().collect(), last_shown);
    let chosen = fresh
        .choose(rng)
        .map(|path| (*path).clone())
        .ok_or_else(|| RotationError::NoCandidates {
            root: root.to_path_buf(),
        })?;

    Ok(Selection {
        shown: vec![chosen.clone()],
        chosen,
        did_reset: true,
    })
}

/// Drop the image on screen unless it is the only candidate left.
///
/// After a manual reset the shown set is empty but `last_shown` is still on
/// screen, so this applies to ordinary picks as well as to resets.
fn excluding_current<'a>(
    candidates: Vec<&'a PathBuf>,
    last_shown: Option<&Path>,
) -> Vec<&'a PathBuf> {
    let Some(current) = last_shown else {
        return candidates;
    };
    let others: Vec<&PathBuf> = candidates
        .iter()
        .copied()
        .filter(|p| p.as_path() != current)
        .collect();
    if others.is_empty() {
        candidates
    } else {
        others
    }
}
