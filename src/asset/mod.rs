//! Image assets: locating, measuring and transforming the files that scene
//! nodes reference.

mod convert;
mod pad;
mod probe;
mod resolve;

use std::path::PathBuf;

use thiserror::Error;

pub use convert::{convert_png_to_webp, webp_path_for, Conversion, WebpSettings};
pub use pad::{pad_image, PaddingPlan};
pub use probe::measure;
pub use resolve::{resolve, PAD_EXTENSIONS, SYNC_EXTENSIONS};

/// Why a single asset could not be measured or transformed.
///
/// These never abort a document: the node keeps its metadata and the failure
/// is reported alongside the node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("no image found for `{logical}` (tried {tried})")]
    NotFound { logical: String, tried: String },

    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("failed to write {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
}

impl AssetError {
    /// Short label used in status output.
    pub fn kind(&self) -> &'static str {
        match self {
            AssetError::NotFound { .. } => "missing",
            AssetError::Decode { .. } => "unreadable",
            AssetError::Encode { .. } => "unwritable",
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        AssetError::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        AssetError::Encode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
