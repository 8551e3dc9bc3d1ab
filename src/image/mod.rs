//! Image format conversion
//!
//! Re-encodes matched PNG artifacts into a web-optimized format next to the
//! source file before upload.

pub mod converter;

pub use converter::{sibling_path, WebpConverter, WEBP_QUALITY};

use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ImageService: Send + Sync {
    /// MIME type of the files this service writes.
    fn content_type(&self) -> &'static str;

    /// Convert `source` and return the path of the new sibling file.
    async fn convert(&self, source: &Path) -> Result<PathBuf>;
}
