use crate::compressor::supported_extension;
use crate::constants::DEFAULT_BATCH_OUTPUT_DIR;
use crate::error::{CompressionError, Result};
use crate::logger::Logger;
use crate::{info, verbose};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

/// Checks that the input exists and can be read.
///
/// Files must carry a supported extension and open for reading; directories
/// must be listable.
pub fn validate_input_path(path: &Path) -> Result<InputKind> {
    let metadata =
        fs::metadata(path).map_err(|_| CompressionError::InvalidInputPath(path.to_path_buf()))?;

    if metadata.is_dir() {
        fs::read_dir(path).map_err(|_| CompressionError::InvalidInputPath(path.to_path_buf()))?;
        return Ok(InputKind::Directory);
    }

    if supported_extension(path).is_none() {
        return Err(CompressionError::UnsupportedFormat(format!(
            "{:?}",
            path.extension().unwrap_or_default()
        )));
    }

    fs::File::open(path).map_err(|_| CompressionError::InvalidInputPath(path.to_path_buf()))?;
    Ok(InputKind::File)
}

/// Output directory used when none is given: a sibling `compressed`
/// directory for batch input, the file's own directory otherwise.
///
/// Directory input is canonicalised first so that `.` or `..` resolve to a
/// real sibling rather than a `compressed` folder under the current
/// directory.
pub fn default_output_dir(input: &Path, kind: InputKind) -> Result<PathBuf> {
    match kind {
        InputKind::Directory => {
            let dir = fs::canonicalize(input).map_err(|e| CompressionError::io(input, e))?;
            let parent = dir.parent().unwrap_or(dir.as_path());
            Ok(parent.join(DEFAULT_BATCH_OUTPUT_DIR))
        }
        InputKind::File => Ok(input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()),
    }
}

/// Creates `dir` (and parents) if missing; an existing directory is fine.
pub fn ensure_output_dir(dir: &Path, logger: &Logger) -> Result<()> {
    if dir.is_dir() {
        verbose!(logger, "Using existing output directory: {:?}", dir);
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| CompressionError::DirectoryCreationFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    info!(logger, "Created output directory: {:?}", dir);
    Ok(())
}
