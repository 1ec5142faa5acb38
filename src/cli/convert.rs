//! Convert command implementation.
//!
//! Replaces every PNG under the scenes directory with a lossy WebP.

use clap::Args;

use crate::batch::BatchDriver;
use crate::error::Result;
use crate::output::{format_size, render_conversion_summary, Printer};

use super::{ExitStatus, RunArgs};

/// Convert PNG images to lossy WebP
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Keep the PNG after a successful conversion
    #[arg(long)]
    pub keep_source: bool,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<ExitStatus> {
    let root = &args.run.root;
    let mut config = args.run.load_config()?;
    if args.keep_source {
        config.delete_source_on_success = false;
    }
    let driver = BatchDriver::new(config)?;

    printer.status(
        "Converting",
        &format!(
            "{} (quality {}, method {})",
            root.display(),
            driver.config().quality,
            driver.config().compression_effort
        ),
    );

    let summary = driver.run_conversion(root, |idx, total, png, outcome| {
        let name = png
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match outcome {
            Ok(c) => printer.status(
                "Converted",
                &format!(
                    "[{}/{}] {} ({} → {} | -{:.1}%)",
                    idx,
                    total,
                    name,
                    format_size(c.original_size as i64),
                    format_size(c.new_size as i64),
                    c.savings_pct()
                ),
            ),
            Err(e) => printer.error("Failed", &format!("[{}/{}] {}: {}", idx, total, name, e)),
        }
    })?;

    if summary.found == 0 {
        printer.info("Finished", &format!("no PNG files found in {}", root.display()));
        return Ok(ExitStatus::Success);
    }

    print!("{}", render_conversion_summary(&summary));

    Ok(ExitStatus::from_success(summary.is_success()))
}
