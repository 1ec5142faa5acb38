//! Canvas padding transform.
//!
//! Portraits are authored cropped to their visible pixels and positioned with
//! `left`/`top`. The padding transform bakes the offset into the image: it
//! grows the canvas to the left by `left` and downwards until the image
//! reaches the frame height, leaving the top and right edges where they are.

use std::path::Path;

use image::{imageops, ImageFormat, RgbaImage};

use crate::persist::write_atomic;

use super::AssetError;

/// Padding computed for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingPlan {
    pub left_padding: u32,
    pub bottom_padding: u32,
    /// Canvas width after padding.
    pub width: u32,
    /// Canvas height after padding.
    pub height: u32,
}

impl PaddingPlan {
    /// Compute the padded canvas for an image placed at (`left`, `top`).
    ///
    /// Negative offsets and images that already reach the frame bottom get no
    /// padding on that side; the canvas never shrinks.
    pub fn compute(left: i64, top: i64, width: u32, height: u32, target_height: u32) -> Self {
        let left_padding = clamp_u32(left);
        let bottom = i64::from(target_height) - top.saturating_add(i64::from(height));
        let bottom_padding = clamp_u32(bottom);

        Self {
            left_padding,
            bottom_padding,
            width: width.saturating_add(left_padding),
            height: height.saturating_add(bottom_padding),
        }
    }
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Pad the PNG at `path` in place and return the applied plan.
///
/// `declared` is the node's recorded size; a missing dimension falls back to
/// the decoded image's. The source is converted to RGBA and copied onto a
/// transparent canvas at (`left_padding`, 0). The file is replaced only after
/// the new PNG has been fully encoded.
pub fn pad_image(
    path: &Path,
    left: i64,
    top: i64,
    declared: (Option<u32>, Option<u32>),
    target_height: u32,
) -> Result<PaddingPlan, AssetError> {
    let source = image::open(path)
        .map_err(|e| AssetError::decode(path, e))?
        .to_rgba8();

    let width = declared.0.unwrap_or(source.width());
    let height = declared.1.unwrap_or(source.height());
    let plan = PaddingPlan::compute(left, top, width, height, target_height);

    let mut canvas = RgbaImage::new(plan.width, plan.height);
    imageops::replace(&mut canvas, &source, i64::from(plan.left_padding), 0);

    write_atomic(path, |writer| {
        canvas
            .write_to(writer, ImageFormat::Png)
            .map_err(|e| e.to_string())
    })
    .map_err(|message| AssetError::encode(path, message))?;

    Ok(plan)
}
