use super::WallpaperSetter;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// `swww img` on every output at once
#[derive(Debug, Clone)]
pub struct SwwwSetter {
    pub transition_type: String,
    pub duration: f32,
    pub fps: u32,
}

impl Default for SwwwSetter {
    fn default() -> Self {
        Self {
            transition_type: "fade".to_string(),
            duration: 1.0,
            fps: 60,
        }
    }
}

impl SwwwSetter {
    fn args(&self, path: &Path) -> Vec<String> {
        vec![
            "img".to_string(),
            path.to_string_lossy().into_owned(),
            "--transition-type".to_string(),
            self.transition_type.clone(),
            "--transition-duration".to_string(),
            self.duration.to_string(),
            "--transition-fps".to_string(),
            self.fps.to_string(),
        ]
    }
}

/// Start swww-daemon if `swww query` says it is not running
fn ensure_daemon() -> Result<()> {
    let status = Command::new("swww").arg("query").output();

    match status {
        Ok(output) if output.status.success() => Ok(()),
        _ => {
            tracing::debug!("starting swww-daemon");
            Command::new("swww-daemon")
                .spawn()
                .context("Failed to start swww-daemon")?;

            // Give it a moment to initialize
            std::thread::sleep(Duration::from_millis(100));
            Ok(())
        }
    }
}

impl WallpaperSetter for SwwwSetter {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        ensure_daemon()?;

        let output = Command::new("swww")
            .args(self.args(path))
            .output()
            .context("Failed to run swww")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("swww failed: {}", stderr.trim());
        }

        Ok(())
    }
}
