//! CLI command implementations

pub mod list;
pub mod shell;

use anyhow::{Context, Result};
use pipefx_core::ImageBuffer;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<ImageBuffer> {
    pipefx_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path, creating the parent directory if needed
pub fn save_image(path: &Path, image: &ImageBuffer) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Directory {} can't be created", dir.display()))?;
    }
    pipefx_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
