use std::path::{Path, PathBuf};

/// Extensions the rotator treats as wallpapers, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

/// Check if a path has a recognized image extension
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file_case_insensitive() {
        assert!(is_image_file(Path::new("/w/a.jpg")));
        assert!(is_image_file(Path::new("/w/b.JPEG")));
        assert!(is_image_file(Path::new("/w/c.Png")));
        assert!(!is_image_file(Path::new("/w/notes.txt")));
        assert!(!is_image_file(Path::new("/w/jpg")));
        assert!(!is_image_file(Path::new("/w/archive.png.zip")));
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        let p = Path::new("/srv/wallpapers");
        assert_eq!(expand_tilde(p), PathBuf::from("/srv/wallpapers"));
    }

    #[test]
    fn test_expand_tilde_uses_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_tilde(Path::new("~/Pictures")),
                home.join("Pictures")
            );
        }
    }
}
