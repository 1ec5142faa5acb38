//! Batch driver.
//!
//! Discovers every input under a scenes root and processes them on a bounded
//! worker pool. Each document is one unit of work (load, walk, store), so two
//! workers never touch the same document. Failures are collected per item;
//! only a missing root stops a run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::asset::{convert_png_to_webp, AssetError, Conversion, WebpSettings};
use crate::config::PipelineConfig;
use crate::discovery::{discover, ScanKind};
use crate::error::{Result, SyncError};
use crate::pass::{process_document, DocumentReport, Pass};

/// A failed item and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub item: PathBuf,
    pub message: String,
}

/// Outcome of running a document pass over a root.
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    pub found: usize,
    pub reports: Vec<DocumentReport>,
    pub failures: Vec<Failure>,
    pub elapsed: Duration,
}

impl PassSummary {
    pub fn succeeded(&self) -> usize {
        self.reports.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn nodes_updated(&self) -> usize {
        self.reports.iter().map(DocumentReport::updated).sum()
    }

    pub fn nodes_skipped(&self) -> usize {
        self.reports.iter().map(DocumentReport::skipped).sum()
    }

    /// True when no document failed. Skipped nodes do not count.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a PNG to WebP conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConversionSummary {
    pub found: usize,
    pub conversions: Vec<Conversion>,
    pub failures: Vec<Failure>,
    pub elapsed: Duration,
}

impl ConversionSummary {
    pub fn successful(&self) -> usize {
        self.conversions.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Bytes of the converted PNGs. Failed items are not counted.
    pub fn original_bytes(&self) -> u64 {
        self.conversions.iter().map(|c| c.original_size).sum()
    }

    pub fn new_bytes(&self) -> u64 {
        self.conversions.iter().map(|c| c.new_size).sum()
    }

    /// Always equals `original_bytes() - new_bytes()`.
    pub fn savings(&self) -> i64 {
        self.original_bytes() as i64 - self.new_bytes() as i64
    }

    pub fn savings_pct(&self) -> f64 {
        let original = self.original_bytes();
        if original == 0 {
            0.0
        } else {
            self.savings() as f64 / original as f64 * 100.0
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-document result handed to progress callbacks.
pub type DocumentOutcome = Result<DocumentReport>;

/// Runs passes over every document (or image) under a root.
pub struct BatchDriver {
    config: PipelineConfig,
    pool: rayon::ThreadPool,
}

impl BatchDriver {
    /// Create a driver; validates the configuration and builds the pool.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let pool = build_thread_pool(config.jobs)?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run `pass` over every scene document under `root`.
    ///
    /// `progress` is called once per document as it finishes, possibly from
    /// a worker thread. The returned reports and failures are in discovery
    /// order.
    pub fn run_pass<P, F>(&self, root: &Path, pass: &P, progress: F) -> Result<PassSummary>
    where
        P: Pass,
        F: Fn(&Path, &DocumentOutcome) + Sync,
    {
        let start = Instant::now();
        let documents = discover(root, pass.documents(), &self.config)?;
        let style = self.config.json_style;

        tracing::info!(pass = pass.name(), root = %root.display(), found = documents.len(), "starting pass");

        let outcomes: Vec<(PathBuf, DocumentOutcome)> = self.pool.install(|| {
            documents
                .par_iter()
                .map(|path| {
                    let outcome = process_document(pass, path, style);
                    progress(path, &outcome);
                    (path.clone(), outcome)
                })
                .collect()
        });

        let mut summary = PassSummary {
            found: documents.len(),
            ..Default::default()
        };

        for (path, outcome) in outcomes {
            match outcome {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    tracing::error!(document = %path.display(), "{}", e);
                    summary.failures.push(Failure {
                        item: path,
                        message: e.to_string(),
                    });
                }
            }
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    /// Convert every PNG under `root` to WebP.
    ///
    /// `progress` receives the 1-based position of the item in discovery
    /// order, the total, and the item's outcome.
    pub fn run_conversion<F>(&self, root: &Path, progress: F) -> Result<ConversionSummary>
    where
        F: Fn(usize, usize, &Path, &std::result::Result<Conversion, AssetError>) + Sync,
    {
        let start = Instant::now();
        let images = discover(root, ScanKind::PngImages, &self.config)?;
        let settings = WebpSettings::from(&self.config);
        let total = images.len();

        tracing::info!(
            root = %root.display(),
            found = total,
            quality = settings.quality,
            method = settings.method,
            "starting conversion"
        );

        let outcomes: Vec<(PathBuf, std::result::Result<Conversion, AssetError>)> =
            self.pool.install(|| {
                images
                    .par_iter()
                    .enumerate()
                    .map(|(idx, png)| {
                        let outcome = convert_png_to_webp(png, &settings);
                        progress(idx + 1, total, png, &outcome);
                        (png.clone(), outcome)
                    })
                    .collect()
            });

        let mut summary = ConversionSummary {
            found: total,
            ..Default::default()
        };

        for (png, outcome) in outcomes {
            match outcome {
                Ok(conversion) => summary.conversions.push(conversion),
                Err(e) => {
                    tracing::warn!(image = %png.display(), "{}", e);
                    summary.failures.push(Failure {
                        item: png,
                        message: e.to_string(),
                    });
                }
            }
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }
}

fn build_thread_pool(jobs: Option<usize>) -> Result<rayon::ThreadPool> {
    if jobs == Some(0) {
        return Err(SyncError::config("jobs must be at least 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = jobs {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| SyncError::Pool {
        message: format!("failed to build worker pool: {}", e),
    })
}
