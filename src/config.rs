//! Pipeline configuration (scenesync.yaml).
//!
//! Holds the encoder settings, padding frame height, worker pool size and
//! discovery excludes. Loaded once and handed to the batch driver; nothing in
//! the pipeline reads configuration from globals.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};
use crate::scene::JsonStyle;

/// The name of the configuration file looked up in the scenes root.
pub const CONFIG_FILENAME: &str = "scenesync.yaml";

/// Default padding frame height in pixels.
pub const DEFAULT_CANVAS_TARGET_HEIGHT: u32 = 480;

/// Pipeline configuration loaded from scenesync.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Lossy WebP quality, 0-100.
    pub quality: u8,

    /// WebP compression method, 0-6 (higher is slower and smaller).
    pub compression_effort: u8,

    /// Remove the PNG once its WebP replacement is on disk.
    pub delete_source_on_success: bool,

    /// Frame height the padding pass extends portraits to.
    pub canvas_target_height: u32,

    /// Worker threads. `None` uses one per CPU.
    pub jobs: Option<usize>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Overrides each pass's default document formatting.
    pub json_style: Option<JsonStyle>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            quality: 95,
            compression_effort: 6,
            delete_source_on_success: true,
            canvas_target_height: DEFAULT_CANVAS_TARGET_HEIGHT,
            jobs: None,
            excludes: vec![],
            json_style: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::io(path, format!("Failed to read configuration: {}", e))
        })?;

        Self::parse(&content)
    }

    /// Resolve the configuration for a run rooted at `root`.
    ///
    /// An explicit path must exist. Without one, `<root>/scenesync.yaml` is
    /// used when present and defaults otherwise.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILENAME);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        Self::load(&path)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| SyncError::Config {
            message: format!("Invalid configuration: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.quality > 100 {
            return Err(SyncError::config(format!(
                "quality must be between 0 and 100, got {}",
                self.quality
            )));
        }
        if self.compression_effort > 6 {
            return Err(SyncError::config(format!(
                "compressionEffort must be between 0 and 6, got {}",
                self.compression_effort
            )));
        }
        if self.canvas_target_height == 0 {
            return Err(SyncError::config("canvasTargetHeight must be at least 1"));
        }
        if self.jobs == Some(0) {
            return Err(SyncError::config("jobs must be at least 1 when set"));
        }
        Ok(())
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }
}

/// Simple glob pattern matching.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        // **/dir/* matches anything inside dir anywhere in the path
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.quality, 95);
        assert_eq!(config.compression_effort, 6);
        assert!(config.delete_source_on_success);
        assert_eq!(config.canvas_target_height, 480);
        assert!(config.jobs.is_none());
        assert!(config.excludes.is_empty());
        assert!(config.json_style.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = PipelineConfig::parse("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
quality: 80
compressionEffort: 4
deleteSourceOnSuccess: false
canvasTargetHeight: 720
jobs: 2
excludes:
  - "*.bak"
  - "**/drafts/*"
jsonStyle: pretty
"#;
        let config = PipelineConfig::parse(yaml).unwrap();

        assert_eq!(config.quality, 80);
        assert_eq!(config.compression_effort, 4);
        assert!(!config.delete_source_on_success);
        assert_eq!(config.canvas_target_height, 720);
        assert_eq!(config.jobs, Some(2));
        assert_eq!(config.excludes, vec!["*.bak", "**/drafts/*"]);
        assert_eq!(config.json_style, Some(JsonStyle::Pretty));
    }

    #[test]
    fn test_parse_rejects_out_of_range_quality() {
        let err = PipelineConfig::parse("quality: 101").unwrap_err();
        assert!(matches!(err, SyncError::Config { .. }));
    }

    #[test]
    fn test_parse_rejects_out_of_range_effort() {
        assert!(PipelineConfig::parse("compressionEffort: 7").is_err());
    }

    #[test]
    fn test_parse_rejects_zero_jobs() {
        assert!(PipelineConfig::parse("jobs: 0").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_style() {
        assert!(PipelineConfig::parse("jsonStyle: fancy").is_err());
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::discover(dir.path(), None).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_discover_reads_root_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "canvasTargetHeight: 600\n").unwrap();

        let config = PipelineConfig::discover(dir.path(), None).unwrap();
        assert_eq!(config.canvas_target_height, 600);
    }

    #[test]
    fn test_discover_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = PipelineConfig::discover(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }

    #[test]
    fn test_is_excluded_extension() {
        let config = PipelineConfig {
            excludes: vec!["*.bak.json".to_string()],
            ..Default::default()
        };

        assert!(config.is_excluded(Path::new("scene.bak.json")));
        assert!(config.is_excluded(Path::new("Portraits/a/scene.bak.json")));
        assert!(!config.is_excluded(Path::new("scene.json")));
    }

    #[test]
    fn test_is_excluded_directory() {
        let config = PipelineConfig {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };

        assert!(config.is_excluded(Path::new("drafts/a.json")));
        assert!(config.is_excluded(Path::new("scenes/drafts/b.json")));
        assert!(!config.is_excluded(Path::new("scenes/final/b.json")));
    }

    #[test]
    fn test_is_excluded_substring() {
        let config = PipelineConfig {
            excludes: vec!["temp".to_string()],
            ..Default::default()
        };

        assert!(config.is_excluded(Path::new("temp")));
        assert!(config.is_excluded(Path::new("path/temp/file.png")));
    }
}
