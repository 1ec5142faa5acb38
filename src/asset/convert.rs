//! Lossless-to-lossy conversion: PNG sources re-encoded as WebP.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::persist::write_bytes_atomic;

use super::AssetError;

/// WebP encoder settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebpSettings {
    /// 0-100.
    pub quality: u8,
    /// libwebp `method`, 0-6.
    pub method: u8,
    pub delete_source: bool,
}

impl From<&PipelineConfig> for WebpSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            quality: config.quality,
            method: config.compression_effort,
            delete_source: config.delete_source_on_success,
        }
    }
}

impl Default for WebpSettings {
    fn default() -> Self {
        WebpSettings::from(&PipelineConfig::default())
    }
}

/// Outcome of one successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub new_size: u64,
}

impl Conversion {
    /// Bytes saved; negative when the WebP came out larger.
    pub fn savings(&self) -> i64 {
        self.original_size as i64 - self.new_size as i64
    }

    /// Savings as a percentage of the original size.
    pub fn savings_pct(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.savings() as f64 / self.original_size as f64 * 100.0
        }
    }
}

/// The WebP file that replaces `png`: same directory, same stem.
pub fn webp_path_for(png: &Path) -> PathBuf {
    png.with_extension("webp")
}

/// Convert `png` to a lossy WebP beside it.
///
/// The WebP is written through a temporary file, so on any failure no `.webp`
/// artifact is left and the PNG is untouched. The PNG is removed only after
/// the WebP is in place, and only when `settings.delete_source` is set.
pub fn convert_png_to_webp(png: &Path, settings: &WebpSettings) -> Result<Conversion, AssetError> {
    let original_size = fs::metadata(png)
        .map_err(|e| AssetError::decode(png, e))?
        .len();

    let source = image::open(png)
        .map_err(|e| AssetError::decode(png, e))?
        .to_rgba8();
    let (width, height) = source.dimensions();

    let output = webp_path_for(png);

    let mut config =
        webp::WebPConfig::new().map_err(|_| AssetError::encode(&output, "invalid WebP config"))?;
    config.lossless = 0;
    config.quality = f32::from(settings.quality);
    config.method = i32::from(settings.method);

    let encoded = webp::Encoder::from_rgba(source.as_raw(), width, height)
        .encode_advanced(&config)
        .map_err(|e| AssetError::encode(&output, format!("{:?}", e)))?;

    write_bytes_atomic(&output, &encoded, png)
        .map_err(|message| AssetError::encode(&output, message))?;

    let new_size = fs::metadata(&output)
        .map_err(|e| AssetError::encode(&output, e))?
        .len();

    if settings.delete_source {
        if let Err(e) = fs::remove_file(png) {
            // The WebP is kept only once its source is gone.
            if let Err(cleanup) = fs::remove_file(&output) {
                tracing::debug!(webp = %output.display(), "failed to remove WebP: {}", cleanup);
            }
            return Err(AssetError::encode(png, format!("failed to remove source: {}", e)));
        }
    }

    Ok(Conversion {
        source: png.to_path_buf(),
        output,
        original_size,
        new_size,
    })
}
