//! Padding: bake each top-level layer's offset into its PNG.

use std::path::Path;

use crate::asset::{pad_image, resolve, AssetError, PAD_EXTENSIONS};
use crate::config::DEFAULT_CANVAS_TARGET_HEIGHT;
use crate::discovery::ScanKind;
use crate::scene::{JsonStyle, Reach, SceneNode};

use super::{NodeUpdate, Pass};

/// Pads the PNG of every direct child of the document root that declares
/// `path`, `left` and `top`. Runs on portrait documents only
/// (`Portraits/<character>/*.json`); nested layers are not padded.
#[derive(Debug, Clone, Copy)]
pub struct PadPass {
    pub canvas_target_height: u32,
}

impl Default for PadPass {
    fn default() -> Self {
        Self {
            canvas_target_height: DEFAULT_CANVAS_TARGET_HEIGHT,
        }
    }
}

impl Pass for PadPass {
    fn name(&self) -> &'static str {
        "pad"
    }

    fn documents(&self) -> ScanKind {
        ScanKind::PortraitDocuments
    }

    fn reach(&self) -> Reach {
        Reach::TopLevel
    }

    fn json_style(&self) -> JsonStyle {
        JsonStyle::Pretty
    }

    fn visit(&self, node: &mut SceneNode, base_dir: &Path) -> Option<Result<NodeUpdate, AssetError>> {
        let logical = node.path()?;
        let (left, top) = (node.left()?, node.top()?);

        let outcome = resolve(base_dir, logical, PAD_EXTENSIONS)
            .ok_or_else(|| AssetError::NotFound {
                logical: logical.to_string(),
                tried: PAD_EXTENSIONS.join(", "),
            })
            .and_then(|asset| {
                let declared = (node.width(), node.height());
                let plan = pad_image(&asset, left, top, declared, self.canvas_target_height)?;
                Ok(NodeUpdate {
                    asset,
                    before: node.size(),
                    after: (plan.width, plan.height),
                })
            });

        if let Ok(update) = &outcome {
            node.set_size(update.after.0, update.after.1);
        }

        Some(outcome)
    }
}
