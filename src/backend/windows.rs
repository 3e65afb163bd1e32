use super::WallpaperSetter;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

const SPI_SETDESKWALLPAPER: u32 = 0x0014;
const SPIF_UPDATEINIFILE: u32 = 0x01;
const SPIF_SENDWININICHANGE: u32 = 0x02;

/// Windows desktop via `SystemParametersInfo`, called from PowerShell
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsSetter;

fn script(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\'', "''");
    format!(
        "Add-Type -TypeDefinition 'using System.Runtime.InteropServices; \
         public static class WallyDesktop {{ \
         [DllImport(\"user32.dll\", CharSet = CharSet.Unicode, SetLastError = true)] \
         public static extern bool SystemParametersInfo(uint action, uint param, string value, uint flags); }}'; \
         if (-not [WallyDesktop]::SystemParametersInfo({action}, 0, '{path}', {flags})) {{ exit 1 }}",
        action = SPI_SETDESKWALLPAPER,
        flags = SPIF_UPDATEINIFILE | SPIF_SENDWININICHANGE,
    )
}

impl WallpaperSetter for WindowsSetter {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let output = Command::new("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", script(path).as_str()])
            .output()
            .context("Failed to run powershell")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("SystemParametersInfo failed: {}", stderr.trim());
        }

        Ok(())
    }
}
