use crate::compressor::{supported_extension, CompressionResult, Compressor};
use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::error::{CompressionError, Result};
use crate::logger::{LogLevel, Logger};
use crate::{error, info, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::{DirEntry, WalkDir};

/// Outcome of a best-effort batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub results: Vec<CompressionResult>,
    pub failures: Vec<(PathBuf, CompressionError)>,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Lists the supported images directly inside `dir`, sorted by path.
///
/// Matching is case-insensitive on the extension. Symlinks are followed, so
/// a link to an image counts as an image. Other regular files are reported as
/// skipped, as are dangling links; hidden entries are ignored.
pub fn collect_image_files(dir: &Path, logger: &Logger) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker.into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                warn!(logger, "Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if supported_extension(&path).is_some() {
            image_files.push(path);
        } else {
            warn!(logger, "Skipping unsupported file: {:?}", path);
        }
    }

    image_files.sort();
    Ok(image_files)
}

/// Compresses `files` one after another into `output_dir`.
///
/// A failing file is logged and recorded; the batch carries on. `cancel` is
/// checked between files so an interrupt stops the run without leaving a
/// half-written output.
pub fn compress_batch(
    compressor: &Compressor<'_>,
    files: &[PathBuf],
    output_dir: &Path,
    cancel: &AtomicBool,
) -> BatchSummary {
    let logger = compressor.logger();
    let total_files = files.len();
    let mut summary = BatchSummary::default();

    if total_files == 0 {
        warn!(logger, "No images to process");
        return summary;
    }

    info!(logger, "Found {} images to process", total_files);

    let progress = if logger.enabled(LogLevel::Info) {
        ProgressBar::new(total_files as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE) {
        progress.set_style(style.progress_chars("#>-"));
    }

    for (index, input_path) in files.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            summary.cancelled = true;
            break;
        }

        let name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.set_message(name.clone());
        verbose!(logger, "Processing {}/{}: {}", index + 1, total_files, name);

        match compressor.compress_image(input_path, Some(output_dir)) {
            Ok(result) => summary.results.push(result),
            Err(e) => {
                error!(logger, "Failed to process {:?}: {}", input_path, e);
                summary.failures.push((input_path.clone(), e));
            }
        }
        progress.inc(1);
    }

    if summary.cancelled {
        progress.abandon_with_message("cancelled");
    } else {
        progress.finish_and_clear();
    }

    if summary.failed() > 0 {
        warn!(logger, "Failed files: {}", summary.failed());
    }

    summary
}
