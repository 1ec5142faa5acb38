//! Dimension-sync: declared width/height follow the real image size.

use std::path::Path;

use crate::asset::{measure, resolve, AssetError, SYNC_EXTENSIONS};
use crate::scene::{JsonStyle, Reach, SceneNode};

use super::{NodeUpdate, Pass};

/// Rewrites `width`/`height` of every node at every depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncPass;

impl Pass for SyncPass {
    fn name(&self) -> &'static str {
        "sync"
    }

    fn reach(&self) -> Reach {
        Reach::Recursive
    }

    fn json_style(&self) -> JsonStyle {
        JsonStyle::Compact
    }

    fn visit(&self, node: &mut SceneNode, base_dir: &Path) -> Option<Result<NodeUpdate, AssetError>> {
        let logical = node.path()?;

        let outcome = resolve(base_dir, logical, SYNC_EXTENSIONS)
            .ok_or_else(|| AssetError::NotFound {
                logical: logical.to_string(),
                tried: SYNC_EXTENSIONS.join(", "),
            })
            .and_then(|asset| {
                let (width, height) = measure(&asset)?;
                Ok(NodeUpdate {
                    asset,
                    before: node.size(),
                    after: (width, height),
                })
            });

        if let Ok(update) = &outcome {
            node.set_size(update.after.0, update.after.1);
        }

        Some(outcome)
    }
}
