//! Init command implementation.
//!
//! Writes a `scenesync.yaml` with the default settings into a scenes
//! directory.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{PipelineConfig, CONFIG_FILENAME};
use crate::discovery::{discover, ScanKind};
use crate::error::{Result, SyncError};
use crate::output::{plural, Printer};

/// Write a default scenesync.yaml into the scenes directory
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Scenes directory
    #[arg(default_value = "scenes")]
    pub path: PathBuf,

    /// Overwrite existing scenesync.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(SyncError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let defaults = PipelineConfig::default();
    let documents = discover(&args.path, ScanKind::Documents, &defaults)?;
    let images = discover(&args.path, ScanKind::PngImages, &defaults)?;

    fs::write(&config_path, render_config(&defaults)).map_err(|e| {
        SyncError::io(&config_path, format!("Failed to write configuration: {}", e))
    })?;

    printer.info(
        "Discovered",
        &format!(
            "{}, {}",
            plural(documents.len(), "document", "documents"),
            plural(images.len(), "PNG file", "PNG files")
        ),
    );
    printer.status("Created", &config_path.display().to_string());

    Ok(())
}

// Written by hand so the file carries comments.
fn render_config(config: &PipelineConfig) -> String {
    let mut yaml = String::new();

    yaml.push_str("# WebP quality for `scenesync convert` (0-100)\n");
    yaml.push_str(&format!("quality: {}\n", config.quality));
    yaml.push_str("# WebP compression effort (0-6, higher is slower and smaller)\n");
    yaml.push_str(&format!("compressionEffort: {}\n", config.compression_effort));
    yaml.push_str("# Remove each PNG once its WebP is written\n");
    yaml.push_str(&format!(
        "deleteSourceOnSuccess: {}\n",
        config.delete_source_on_success
    ));
    yaml.push_str("# Frame height for `scenesync pad`\n");
    yaml.push_str(&format!(
        "canvasTargetHeight: {}\n",
        config.canvas_target_height
    ));
    yaml.push_str("# Worker threads (omit for one per CPU)\n");
    yaml.push_str("# jobs: 4\n");
    yaml.push_str("# Paths to skip, relative to this directory\n");
    yaml.push_str("excludes: []\n");

    yaml
}
