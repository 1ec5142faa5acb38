//! Scene documents: the JSON tree model, load/store, and traversal.

mod document;
mod walk;

pub use document::{load, store, JsonStyle, Nullable, SceneDocument, SceneNode};
pub use walk::{walk, Reach, Visit};
