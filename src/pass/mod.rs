//! Metadata passes over scene documents.
//!
//! A pass decides, per node, what to do with the node's asset and how far
//! below the document root it applies. Running a pass over a document walks
//! the tree, collects one report per asset-bearing node, and never aborts on
//! a single asset's failure.

mod pad;
mod sync;

use std::path::{Path, PathBuf};

use crate::asset::AssetError;
use crate::discovery::ScanKind;
use crate::error::Result;
use crate::scene::{self, JsonStyle, Reach, SceneDocument, SceneNode};

pub use pad::PadPass;
pub use sync::SyncPass;

/// A node whose metadata was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeUpdate {
    /// The resolved asset file.
    pub asset: PathBuf,
    /// Declared size before the pass, if any.
    pub before: Option<(u32, u32)>,
    pub after: (u32, u32),
}

impl NodeUpdate {
    pub fn changed(&self) -> bool {
        self.before != Some(self.after)
    }
}

/// Result of visiting one asset-bearing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    /// The node's logical `path`.
    pub logical: String,
    pub outcome: std::result::Result<NodeUpdate, AssetError>,
}

/// Per-node behaviour of a metadata pass.
pub trait Pass: Sync {
    /// Short name used in logs and status output.
    fn name(&self) -> &'static str;

    /// Which documents under the scenes root the pass runs on.
    fn documents(&self) -> ScanKind {
        ScanKind::Documents
    }

    /// Which nodes the pass visits.
    fn reach(&self) -> Reach;

    /// Formatting for documents this pass rewrites.
    fn json_style(&self) -> JsonStyle;

    /// Process one node. `None` means the node is not this pass's concern.
    fn visit(
        &self,
        node: &mut SceneNode,
        base_dir: &Path,
    ) -> Option<std::result::Result<NodeUpdate, AssetError>>;
}

/// Summary of one processed document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub nodes: Vec<NodeReport>,
}

impl DocumentReport {
    pub fn updated(&self) -> usize {
        self.nodes.iter().filter(|n| n.outcome.is_ok()).count()
    }

    pub fn skipped(&self) -> usize {
        self.nodes.iter().filter(|n| n.outcome.is_err()).count()
    }

    /// Skipped nodes with their reasons.
    pub fn warnings(&self) -> impl Iterator<Item = (&str, &AssetError)> {
        self.nodes
            .iter()
            .filter_map(|n| n.outcome.as_ref().err().map(|e| (n.logical.as_str(), e)))
    }
}

/// Run `pass` over an in-memory document.
///
/// Assets resolve relative to `base_dir`. Node order and every field the pass
/// does not own are left as they were.
pub fn apply<P: Pass + ?Sized>(pass: &P, doc: &mut SceneDocument, base_dir: &Path) -> Vec<NodeReport> {
    let mut reports = Vec::new();

    doc.walk_mut(pass.reach(), &mut |node, visit| {
        let Some(outcome) = pass.visit(node, base_dir) else {
            return;
        };
        let logical = node.path().unwrap_or_default().to_string();

        match &outcome {
            Ok(update) => tracing::debug!(
                pass = pass.name(),
                node = %logical,
                depth = visit.depth,
                asset = %update.asset.display(),
                width = update.after.0,
                height = update.after.1,
                "updated node"
            ),
            Err(e) => tracing::warn!(
                pass = pass.name(),
                node = %logical,
                dir = %base_dir.display(),
                "{}",
                e
            ),
        }

        reports.push(NodeReport { logical, outcome });
    });

    reports
}

/// Load, process and store one document.
///
/// The document is rewritten only after the whole tree has been processed;
/// a load or store failure leaves the file as it was.
#[tracing::instrument(skip(pass, style), fields(pass_name = pass.name()))]
pub fn process_document<P: Pass + ?Sized>(
    pass: &P,
    path: &Path,
    style: Option<JsonStyle>,
) -> Result<DocumentReport> {
    let mut doc = scene::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let nodes = apply(pass, &mut doc, base_dir);

    scene::store(&doc, path, style.unwrap_or_else(|| pass.json_style()))?;

    Ok(DocumentReport {
        path: path.to_path_buf(),
        nodes,
    })
}
