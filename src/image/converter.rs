use super::ImageService;
use crate::{Error, Result};
use async_trait::async_trait;
use image::DynamicImage;
use std::path::{Path, PathBuf};

pub const WEBP_QUALITY: f32 = 85.0;

pub struct WebpConverter {
    quality: f32,
}

impl WebpConverter {
    pub fn new() -> Self {
        Self::with_quality(WEBP_QUALITY)
    }

    pub fn with_quality(quality: f32) -> Self {
        Self {
            quality: quality.clamp(0.0, 100.0),
        }
    }

    fn convert_sync(source: PathBuf, target: PathBuf, quality: f32) -> Result<()> {
        let img = image::open(&source)?;

        // libwebp only takes 8-bit RGB or RGBA input
        let img = if img.color().has_alpha() {
            DynamicImage::ImageRgba8(img.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(img.to_rgb8())
        };

        let encoder = webp::Encoder::from_image(&img)
            .map_err(|e| Error::Conversion(format!("{}: {}", source.display(), e)))?;
        let encoded = encoder
            .encode_simple(false, quality)
            .map_err(|e| Error::Conversion(format!("{}: {:?}", source.display(), e)))?;

        std::fs::write(&target, &*encoded)?;
        Ok(())
    }
}

impl Default for WebpConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for WebpConverter {
    fn content_type(&self) -> &'static str {
        "image/webp"
    }

    async fn convert(&self, source: &Path) -> Result<PathBuf> {
        let target = sibling_path(source, "webp");

        tokio::task::spawn_blocking({
            let source = source.to_path_buf();
            let target = target.clone();
            let quality = self.quality;
            move || Self::convert_sync(source, target, quality)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image conversion task join error: {}", e)))??;

        Ok(target)
    }
}

/// `source` with its extension swapped for `extension`.
pub fn sibling_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use tempfile::tempdir;

    fn write_test_png(path: &Path) {
        let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_sibling_path_swaps_extension_only() {
        assert_eq!(
            sibling_path(Path::new("/a/png.dir/bulk_upload_featured.png"), "webp"),
            PathBuf::from("/a/png.dir/bulk_upload_featured.webp")
        );
    }

    #[tokio::test]
    async fn test_convert_writes_webp_sibling() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("bulk_upload_steps_123.png");
        write_test_png(&source);

        let converter = WebpConverter::new();
        let target = converter.convert(&source).await.unwrap();

        assert_eq!(target, dir.path().join("bulk_upload_steps_123.webp"));
        assert!(target.exists());
        assert!(source.exists());

        let bytes = std::fs::read(&target).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        let decoded = image::open(&target).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
    }

    #[tokio::test]
    async fn test_convert_opaque_rgb_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("rgb.png");
        image::RgbImage::from_pixel(4, 6, image::Rgb([0, 128, 255]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();

        let target = WebpConverter::new().convert(&source).await.unwrap();

        let decoded = image::open(&target).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 6));
    }

    #[tokio::test]
    async fn test_convert_rejects_corrupt_png() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.png");
        std::fs::write(&source, b"not really a png").unwrap();

        let result = WebpConverter::new().convert(&source).await;

        assert!(result.is_err());
        assert!(!dir.path().join("broken.webp").exists());
    }

    #[tokio::test]
    async fn test_convert_oversized_image_is_conversion_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("too_wide.png");
        image::GrayImage::from_pixel(17000, 1, image::Luma([128]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();

        let result = WebpConverter::new().convert(&source).await;

        assert!(matches!(result, Err(Error::Conversion(_))));
        assert!(!dir.path().join("too_wide.webp").exists());
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(WebpConverter::with_quality(150.0).quality, 100.0);
        assert_eq!(WebpConverter::new().quality, WEBP_QUALITY);
    }
}
