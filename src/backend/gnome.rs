use super::WallpaperSetter;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;

const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";

/// GNOME / Ubuntu via `gsettings`
#[derive(Debug, Default, Clone, Copy)]
pub struct GnomeSetter;

fn file_uri(path: &Path) -> Result<String> {
    let s = path
        .to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))?;
    Ok(format!("file://{s}"))
}

fn gsettings(key: &str, value: &str) -> Result<bool> {
    let status = Command::new("gsettings")
        .args(["set", BACKGROUND_SCHEMA, key, value])
        .status()
        .with_context(|| format!("Failed to run gsettings ({key})"))?;
    Ok(status.success())
}

impl WallpaperSetter for GnomeSetter {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let uri = file_uri(path)?;

        if !gsettings("picture-uri", &uri)? {
            anyhow::bail!("gsettings failed (picture-uri)");
        }

        // Older GNOME has no dark variant.
        if let Ok(false) | Err(_) = gsettings("picture-uri-dark", &uri) {
            tracing::debug!("picture-uri-dark not updated");
        }

        Ok(())
    }
}
