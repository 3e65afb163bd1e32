use super::ImageSource;
use crate::utils::is_image_file;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Non-recursive listing of image files in a directory
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryLister;

impl ImageSource for DirectoryLister {
    fn list_images(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .context("Failed to resolve current directory")?
                .join(root)
        };

        let mut images: Vec<PathBuf> = fs::read_dir(&root)
            .with_context(|| format!("Failed to read directory: {}", root.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_image_file(p))
            .collect();

        images.sort();
        images.dedup();
        Ok(images)
    }
}
