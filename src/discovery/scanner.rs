//! File system scanner for scene documents and images.
//!
//! Walks a directory and collects files by extension. Portrait documents are
//! only looked for one folder deep under `Portraits/`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::PipelineConfig;

/// Folder under the scenes root holding one folder per character.
pub const PORTRAITS_DIR: &str = "Portraits";

/// What a scan looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    /// `*.json` scene documents at any depth.
    Documents,
    /// `Portraits/<character>/*.json` portrait documents.
    PortraitDocuments,
    /// `*.png` sources for conversion.
    PngImages,
}

impl ScanKind {
    /// The file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            ScanKind::Documents | ScanKind::PortraitDocuments => "json",
            ScanKind::PngImages => "png",
        }
    }

    /// Directory a scan of this kind starts from.
    pub fn base(&self, root: &Path) -> PathBuf {
        match self {
            ScanKind::PortraitDocuments => root.join(PORTRAITS_DIR),
            ScanKind::Documents | ScanKind::PngImages => root.to_path_buf(),
        }
    }

    fn depth(&self) -> Option<usize> {
        match self {
            ScanKind::PortraitDocuments => Some(2),
            ScanKind::Documents | ScanKind::PngImages => None,
        }
    }

    /// Check whether a path has this kind's extension (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(self.extension()))
    }
}

/// Scan a directory for files of one kind.
///
/// Results are sorted so runs process files in a stable order. Excludes are
/// matched against the path relative to `root`.
pub fn scan_directory(root: &Path, kind: ScanKind, config: &PipelineConfig) -> Vec<PathBuf> {
    let mut result = Vec::new();

    let mut walker = WalkDir::new(kind.base(root)).follow_links(true);
    if let Some(depth) = kind.depth() {
        walker = walker.min_depth(depth).max_depth(depth);
    }

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_excluded(relative) {
            continue;
        }

        if kind.matches(path) {
            result.push(path.to_path_buf());
        }
    }

    result.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_kind_matches() {
        assert!(ScanKind::Documents.matches(Path::new("a/scene.json")));
        assert!(ScanKind::Documents.matches(Path::new("SCENE.JSON")));
        assert!(!ScanKind::Documents.matches(Path::new("scene.json.bak")));
        assert!(ScanKind::PngImages.matches(Path::new("face.png")));
        assert!(!ScanKind::PngImages.matches(Path::new("face.webp")));
        assert!(!ScanKind::PngImages.matches(Path::new("png")));
        assert!(ScanKind::PortraitDocuments.matches(Path::new("alice.json")));
    }

    #[test]
    fn test_scan_portraits_one_folder_deep() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Portraits/Alice/old")).unwrap();
        fs::create_dir_all(root.join("Portraits/Bob")).unwrap();
        fs::create_dir_all(root.join("BG")).unwrap();
        fs::write(root.join("Portraits/Alice/alice.json"), "{}").unwrap();
        fs::write(root.join("Portraits/Alice/old/alice.json"), "{}").unwrap();
        fs::write(root.join("Portraits/Bob/bob.json"), "{}").unwrap();
        fs::write(root.join("Portraits/index.json"), "{}").unwrap();
        fs::write(root.join("BG/park.json"), "{}").unwrap();
        fs::write(root.join("title.json"), "{}").unwrap();

        let result = scan_directory(root, ScanKind::PortraitDocuments, &PipelineConfig::default());

        assert_eq!(
            result,
            vec![
                root.join("Portraits/Alice/alice.json"),
                root.join("Portraits/Bob/bob.json"),
            ]
        );
    }

    #[test]
    fn test_scan_portraits_honours_excludes() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Portraits/Alice")).unwrap();
        fs::write(root.join("Portraits/Alice/alice.json"), "{}").unwrap();
        fs::write(root.join("Portraits/Alice/alice.bak.json"), "{}").unwrap();

        let config = PipelineConfig {
            excludes: vec!["*.bak.json".to_string()],
            ..Default::default()
        };
        let result = scan_directory(root, ScanKind::PortraitDocuments, &config);

        assert_eq!(result, vec![root.join("Portraits/Alice/alice.json")]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(dir.path(), ScanKind::Documents, &PipelineConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Portraits/Bob")).unwrap();
        fs::create_dir_all(dir.path().join("Portraits/Alice")).unwrap();
        fs::write(dir.path().join("Portraits/Bob/bob.json"), "{}").unwrap();
        fs::write(dir.path().join("Portraits/Alice/alice.json"), "{}").unwrap();
        fs::write(dir.path().join("Portraits/Alice/face.png"), "").unwrap();
        fs::write(dir.path().join("title.json"), "{}").unwrap();

        let result = scan_directory(dir.path(), ScanKind::Documents, &PipelineConfig::default());

        assert_eq!(
            result,
            vec![
                dir.path().join("Portraits/Alice/alice.json"),
                dir.path().join("Portraits/Bob/bob.json"),
                dir.path().join("title.json"),
            ]
        );
    }

    #[test]
    fn test_scan_images() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.png"), "").unwrap();
        fs::write(dir.path().join("b.webp"), "").unwrap();
        fs::write(dir.path().join("scene.json"), "{}").unwrap();

        let result = scan_directory(dir.path(), ScanKind::PngImages, &PipelineConfig::default());
        assert_eq!(result, vec![dir.path().join("a.png")]);
    }

    #[test]
    fn test_scan_with_excludes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("scene.json"), "{}").unwrap();
        fs::write(dir.path().join("drafts/old.json"), "{}").unwrap();

        let config = PipelineConfig {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };
        let result = scan_directory(dir.path(), ScanKind::Documents, &config);

        assert_eq!(result, vec![dir.path().join("scene.json")]);
    }

    #[test]
    fn test_scan_skips_directories_named_like_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("weird.json")).unwrap();

        let result = scan_directory(dir.path(), ScanKind::Documents, &PipelineConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        let result = scan_directory(
            Path::new("/nonexistent/path"),
            ScanKind::Documents,
            &PipelineConfig::default(),
        );
        assert!(result.is_empty());
    }
}
