//! # pipefx-io
//!
//! Image loading and saving for pipefx.
//!
//! Only PNG is supported. Files are dispatched by extension; anything else
//! is [`IoError::UnsupportedFormat`].
//!
//! ```rust,ignore
//! let image = pipefx_io::read("photo.png")?;
//! pipefx_io::write("out.png", &image)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod png;

pub use error::{IoError, IoResult};

use pipefx_core::ImageBuffer;
use std::path::Path;

/// File extensions [`read`] and [`write`] accept, lowercase.
pub const EXTENSIONS: &[&str] = &["png"];

/// Returns `true` if the extension of `path` is supported.
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    extension(path.as_ref()).is_some_and(|ext| EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn check_format(path: &Path) -> IoResult<()> {
    if is_supported(path) {
        Ok(())
    } else {
        Err(IoError::UnsupportedFormat(format!(
            "{} (supported: {})",
            path.display(),
            EXTENSIONS.join(", ")
        )))
    }
}

/// Reads an image file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuffer> {
    check_format(path.as_ref())?;
    png::read(path)
}

/// Writes an image file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> IoResult<()> {
    check_format(path.as_ref())?;
    png::write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(is_supported("a.png"));
        assert!(is_supported("dir/B.PNG"));
        assert!(!is_supported("a.jpg"));
        assert!(!is_supported("noext"));
    }

    #[test]
    fn test_unsupported_write() {
        let err = write("out.bmp", &ImageBuffer::new(1, 1)).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
