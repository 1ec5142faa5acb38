//! Pad command implementation.
//!
//! Extends top-level portrait layers to the frame height and records the new
//! size in the documents. Only `<root>/Portraits/<character>/*.json` are
//! touched.

use clap::Args;

use crate::batch::BatchDriver;
use crate::error::Result;
use crate::output::{display_path, render_pass_summary, Printer};
use crate::pass::{PadPass, Pass};

use super::{report_document, ExitStatus, RunArgs};

/// Pad top-level portrait layers to the frame height
#[derive(Args, Debug)]
pub struct PadArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Frame height to pad to (overrides canvasTargetHeight)
    #[arg(long)]
    pub canvas_height: Option<u32>,
}

pub fn run(args: PadArgs, printer: &Printer) -> Result<ExitStatus> {
    let root = &args.run.root;
    let mut config = args.run.load_config()?;
    if let Some(height) = args.canvas_height {
        config.canvas_target_height = height;
    }

    let pass = PadPass {
        canvas_target_height: config.canvas_target_height,
    };
    let driver = BatchDriver::new(config)?;

    printer.status(
        "Padding",
        &format!(
            "{} to {}px",
            pass.documents().base(root).display(),
            driver.config().canvas_target_height
        ),
    );

    let summary = driver.run_pass(root, &pass, |path, outcome| {
        report_document(printer, "Padded", root, path, outcome)
    })?;

    if summary.found == 0 {
        printer.info("Finished", "no portrait documents found");
        return Ok(ExitStatus::Success);
    }

    for report in &summary.reports {
        for (logical, reason) in report.warnings() {
            printer.warning(
                reason.kind(),
                &format!("{} in {}", logical, display_path(&report.path, root)),
            );
        }
    }

    print!("{}", render_pass_summary("Padding Complete!", &summary, root));

    Ok(ExitStatus::from_success(summary.is_success()))
}
