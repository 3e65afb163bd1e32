use super::WallpaperSetter;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// macOS desktop picture through Finder
#[derive(Debug, Default, Clone, Copy)]
pub struct MacosSetter;

fn script(path: &Path) -> String {
    let path = path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!("tell application \"Finder\" to set desktop picture to POSIX file \"{path}\"")
}

impl WallpaperSetter for MacosSetter {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let output = Command::new("osascript")
            .arg("-e")
            .arg(script(path))
            .output()
            .context("Failed to run osascript")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("osascript failed: {}", stderr.trim());
        }

        Ok(())
    }
}
