//! Sync command implementation.
//!
//! Rewrites every node's width/height from its resolved image.

use clap::Args;

use crate::batch::BatchDriver;
use crate::error::Result;
use crate::output::{display_path, plural, render_pass_summary, Printer};
use crate::pass::SyncPass;

use super::{report_document, ExitStatus, RunArgs};

/// Rewrite width/height of every node to match its image
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

pub fn run(args: SyncArgs, printer: &Printer) -> Result<ExitStatus> {
    let root = &args.run.root;
    let driver = BatchDriver::new(args.run.load_config()?)?;

    printer.status("Scanning", &root.display().to_string());

    let summary = driver.run_pass(root, &SyncPass, |path, outcome| {
        report_document(printer, "Synced", root, path, outcome)
    })?;

    if summary.found == 0 {
        printer.info("Finished", "no JSON files found in scenes directory");
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

    print!("{}", render_pass_summary("Sync Complete!", &summary, root));
    printer.info(
        "Finished",
        &format!(
            "{} of {}",
            plural(summary.succeeded(), "document", "documents"),
            summary.found
        ),
    );

    Ok(ExitStatus::from_success(summary.is_success()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;
    use image::RgbaImage;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(root: PathBuf) -> SyncArgs {
        SyncArgs {
            run: RunArgs {
                root,
                config: None,
                jobs: Some(1),
            },
        }
    }

    #[test]
    fn test_sync_updates_documents() {
        let dir = tempdir().unwrap();
        RgbaImage::new(150, 220).save(dir.path().join("char.png")).unwrap();
        fs::write(
            dir.path().join("scene.json"),
            r#"{"children": [{"path": "char"}, {"path": "ghost"}]}"#,
        )
        .unwrap();

        let status = run(args(dir.path().to_path_buf()), &Printer::new()).unwrap();

        assert_eq!(status, ExitStatus::Success);
        let doc = scene::load(&dir.path().join("scene.json")).unwrap();
        assert_eq!(doc.children()[0].size(), Some((150, 220)));
        assert_eq!(doc.children()[1].size(), None);
    }

    #[test]
    fn test_sync_bad_document_fails_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "nope").unwrap();

        let status = run(args(dir.path().to_path_buf()), &Printer::new()).unwrap();
        assert_eq!(status, ExitStatus::Failure);
    }

    #[test]
    fn test_sync_empty_root_succeeds() {
        let dir = tempdir().unwrap();
        let status = run(args(dir.path().to_path_buf()), &Printer::new()).unwrap();
        assert_eq!(status, ExitStatus::Success);
    }

    #[test]
    fn test_sync_missing_root_errors() {
        let dir = tempdir().unwrap();
        assert!(run(args(dir.path().join("scenes")), &Printer::new()).is_err());
    }
}
