//! Header-only dimension probing.

use std::path::Path;

use image::ImageReader;

use super::AssetError;

/// Read an image's pixel dimensions without decoding its pixels.
///
/// The format is sniffed from the file contents, so a mislabelled file still
/// measures correctly. The file handle is dropped before returning.
pub fn measure(path: &Path) -> Result<(u32, u32), AssetError> {
    let reader = ImageReader::open(path)
        .map_err(|e| AssetError::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| AssetError::decode(path, e))?;

    reader
        .into_dimensions()
        .map_err(|e| AssetError::decode(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_measure_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        RgbaImage::new(200, 300).save(&path).unwrap();

        assert_eq!(measure(&path).unwrap(), (200, 300));
    }

    #[test]
    fn test_measure_webp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("char.webp");
        RgbaImage::new(150, 220)
            .save_with_format(&path, ImageFormat::WebP)
            .unwrap();

        assert_eq!(measure(&path).unwrap(), (150, 220));
    }

    #[test]
    fn test_measure_mislabelled_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("actually-png.jpg");
        RgbaImage::new(7, 9)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        assert_eq!(measure(&path).unwrap(), (7, 9));
    }

    #[test]
    fn test_measure_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not an image").unwrap();

        assert!(matches!(measure(&path), Err(AssetError::Decode { .. })));
    }

    #[test]
    fn test_measure_vanished_file() {
        let dir = tempdir().unwrap();
        let err = measure(&dir.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }
}
