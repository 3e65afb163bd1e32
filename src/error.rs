//! Failure taxonomy for a rotation cycle.
//!
//! Every variant is recoverable: the scheduler logs it and re-arms its timer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotationError {
    /// The candidate pool was empty, nothing to pick from.
    #[error("no candidate images in {}", root.display())]
    NoCandidates { root: PathBuf },

    /// The settings record could not be read or written.
    #[error("settings file {} is unusable", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The settings record parsed but breaks an invariant.
    #[error("invalid settings in {}: {reason}", path.display())]
    InvalidSettings { path: PathBuf, reason: String },

    /// A collaborator (lister, wallpaper setter, sound) failed.
    #[error("{what} failed")]
    ExternalCall {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl RotationError {
    pub fn external(what: &'static str, source: anyhow::Error) -> Self {
        Self::ExternalCall { what, source }
    }

    /// Message followed by every cause, for log lines.
    pub fn chain(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        msg
    }
}
