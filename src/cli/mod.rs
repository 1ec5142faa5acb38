pub mod completions;
pub mod convert;
pub mod init;
pub mod pad;
pub mod sync;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::batch::DocumentOutcome;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// scenesync - keep scene documents in step with their image assets
#[derive(Parser, Debug)]
#[command(name = "scenesync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite width/height of every node to match its image
    Sync(sync::SyncArgs),

    /// Pad top-level portrait layers to the frame height
    Pad(pad::PadArgs),

    /// Convert PNG images to lossy WebP
    Convert(convert::ConvertArgs),

    /// Write a default scenesync.yaml into the scenes directory
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Whether a command finished without failed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn from_success(ok: bool) -> Self {
        if ok {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

/// Arguments shared by every batch command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenes directory to process
    #[arg(default_value = "scenes")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/scenesync.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads (default: one per CPU)
    #[arg(long, short)]
    pub jobs: Option<usize>,
}

impl RunArgs {
    /// Resolve configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::discover(&self.root, self.config.as_deref())?;
        if self.jobs.is_some() {
            config.jobs = self.jobs;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Print the per-document status line for a finished document.
pub(crate) fn report_document(
    printer: &Printer,
    verb: &str,
    root: &Path,
    path: &Path,
    outcome: &DocumentOutcome,
) {
    let shown = display_path(path, root);

    match outcome {
        Ok(report) => {
            let mut message = format!("{} ({} updated)", shown, plural(report.updated(), "node", "nodes"));
            if report.skipped() > 0 {
                message.push(' ');
                message.push_str(&printer.dim(&format!("{} skipped", report.skipped())));
            }
            printer.status(verb, &message);
        }
        Err(e) => printer.error("Failed", &format!("{}: {}", shown, e)),
    }
}
