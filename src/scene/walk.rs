//! Depth-first traversal of the scene tree.

use super::document::{SceneDocument, SceneNode};

/// How far a walk descends below the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Direct children of the document root only.
    TopLevel,
    /// Every node at every depth.
    Recursive,
}

/// Position of a visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// 0 for direct children of the document root.
    pub depth: usize,
    /// Index among its siblings.
    pub index: usize,
}

/// Visit nodes pre-order, in document order.
///
/// The visitor runs on a node before any of its children, so a visitor that
/// rewrites a node's `children` sees its own edits reflected in the descent.
pub fn walk<F>(nodes: &mut [SceneNode], reach: Reach, visit: &mut F)
where
    F: FnMut(&mut SceneNode, Visit),
{
    walk_at(nodes, reach, 0, visit);
}

fn walk_at<F>(nodes: &mut [SceneNode], reach: Reach, depth: usize, visit: &mut F)
where
    F: FnMut(&mut SceneNode, Visit),
{
    for (index, node) in nodes.iter_mut().enumerate() {
        visit(node, Visit { depth, index });

        if reach == Reach::Recursive {
            if let Some(children) = node.children_mut() {
                walk_at(children, reach, depth + 1, visit);
            }
        }
    }
}

impl SceneDocument {
    /// Walk the document's nodes with the given reach.
    pub fn walk_mut<F>(&mut self, reach: Reach, visit: &mut F)
    where
        F: FnMut(&mut SceneNode, Visit),
    {
        if let Some(children) = self.children_mut() {
            walk(children, reach, visit);
        }
    }
}
