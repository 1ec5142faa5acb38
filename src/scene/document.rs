//! Scene document model and load/store.
//!
//! A scene document is a JSON object with a `children` array of nodes. Only
//! the fields the passes read or write are typed; everything else rides along
//! in a flattened `extra` map so a load/store cycle keeps unrelated metadata
//! intact. Typed fields are written first, then `extra` in its original order.
//! A typed key that was present as `null` is written back as `null`.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Result, SyncError};
use crate::persist::write_atomic;

/// A key that is absent (`None`), explicitly `null` (`Some(None)`) or set.
pub type Nullable<T> = Option<Option<T>>;

/// Output formatting for stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStyle {
    /// Single line, no insignificant whitespace.
    Compact,
    /// Two-space indentation.
    Pretty,
}

/// Root of a scene document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub children: Nullable<Vec<SceneNode>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One layer in the scene tree.
///
/// Numeric placement fields are kept as JSON numbers so values the pipeline
/// never writes survive exactly as they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Logical asset path, relative to the document directory, without extension.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub path: Nullable<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub left: Nullable<Number>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub top: Nullable<Number>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub width: Nullable<Number>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub height: Nullable<Number>,

    /// Child layers in z-order.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub children: Nullable<Vec<SceneNode>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SceneNode {
    /// Create a node referencing an asset.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(Some(path.into())),
            ..Default::default()
        }
    }

    /// The logical asset path, if set.
    pub fn path(&self) -> Option<&str> {
        value(&self.path).map(String::as_str)
    }

    pub fn left(&self) -> Option<i64> {
        value(&self.left).and_then(number_to_i64)
    }

    pub fn top(&self) -> Option<i64> {
        value(&self.top).and_then(number_to_i64)
    }

    pub fn width(&self) -> Option<u32> {
        value(&self.width).and_then(number_to_u32)
    }

    pub fn height(&self) -> Option<u32> {
        value(&self.height).and_then(number_to_u32)
    }

    /// Declared size, if both dimensions are present.
    pub fn size(&self) -> Option<(u32, u32)> {
        Some((self.width()?, self.height()?))
    }

    /// Record new pixel dimensions as integers.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = Some(Some(Number::from(width)));
        self.height = Some(Some(Number::from(height)));
    }

    /// Child nodes, empty when the key is absent or null.
    pub fn children(&self) -> &[SceneNode] {
        value(&self.children).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<SceneNode>> {
        self.children.as_mut().and_then(Option::as_mut)
    }
}

impl SceneDocument {
    /// Top-level nodes, empty when the key is absent or null.
    pub fn children(&self) -> &[SceneNode] {
        value(&self.children).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<SceneNode>> {
        self.children.as_mut().and_then(Option::as_mut)
    }

    /// Asset paths in pre-order (document order).
    pub fn asset_paths(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [SceneNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                if let Some(path) = node.path() {
                    out.push(path);
                }
                collect(node.children(), out);
            }
        }

        let mut out = Vec::new();
        collect(self.children(), &mut out);
        out
    }

    /// Parse a document from a JSON string.
    ///
    /// Nesting depth is unbounded; the stack grows on demand for deep trees.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        let mut json = serde_json::Deserializer::from_str(source);
        json.disable_recursion_limit();

        let doc = Self::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(doc)
    }

    /// Serialize the document in the given style.
    pub fn to_json(&self, style: JsonStyle) -> serde_json::Result<String> {
        match style {
            JsonStyle::Compact => serde_json::to_string(self),
            JsonStyle::Pretty => serde_json::to_string_pretty(self),
        }
    }
}

/// Load a scene document from disk.
pub fn load(path: &Path) -> Result<SceneDocument> {
    let source = fs::read_to_string(path)
        .map_err(|e| SyncError::io(path, format!("Failed to read document: {}", e)))?;

    SceneDocument::from_json(&source).map_err(|e| SyncError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
        help: Some("Scene documents must be a JSON object with a `children` array".to_string()),
    })
}

/// Store a scene document, replacing the file atomically.
pub fn store(doc: &SceneDocument, path: &Path, style: JsonStyle) -> Result<()> {
    let json = doc.to_json(style).map_err(|e| SyncError::Parse {
        path: path.to_path_buf(),
        message: format!("Failed to serialize document: {}", e),
        help: None,
    })?;

    write_atomic(path, |writer| {
        writer
            .write_all(json.as_bytes())
            .map_err(|e| format!("Failed to write document: {}", e))
    })
    .map_err(|message| SyncError::io(path, message))
}

/// Deserialize a present key, keeping `null` distinct from absence.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn value<T>(field: &Nullable<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

fn number_to_i64(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64))
}

fn number_to_u32(n: &Number) -> Option<u32> {
    number_to_i64(n).and_then(|v| u32::try_from(v).ok())
}
