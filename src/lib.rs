//! scenesync - scene document and image asset synchronization
//!
//! A library for keeping the width/height (and, for portraits, the padded
//! canvas) recorded in scene-graph JSON documents truthful to the image
//! files they reference, plus batch PNG to WebP conversion.

pub mod asset;
pub mod batch;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pass;
pub mod persist;
pub mod scene;

pub use asset::{measure, pad_image, resolve, AssetError, Conversion, PaddingPlan, WebpSettings};
pub use batch::{BatchDriver, ConversionSummary, Failure, PassSummary};
pub use config::PipelineConfig;
pub use error::{Result, SyncError};
pub use pass::{DocumentReport, NodeReport, NodeUpdate, PadPass, Pass, SyncPass};
pub use scene::{JsonStyle, Reach, SceneDocument, SceneNode};
