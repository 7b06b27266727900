use crate::constants::{
    MAX_QUALITY, MAX_SCALE_FACTOR, MIN_QUALITY, MIN_SCALE_FACTOR, SUPPORTED_EXTENSIONS,
};
use crate::encoder::encode;
use crate::error::{CompressionError, Result};
use crate::formats::{
    normalize_extension, resolve_output_format, resolve_save_parameters, FormatChoice,
    OutputFormat,
};
use crate::logger::Logger;
use crate::metadata::strip_metadata;
use crate::modes::{CompressionMode, FormatMapping};
use crate::processing::{downscale, flatten_alpha, load_image};
use crate::utils::{calculate_reduction_percent, format_file_size};
use crate::{info, verbose};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Optional per-invocation overrides of a mode's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub quality: Option<i64>,
    pub scale_factor: Option<f64>,
    pub keep_metadata: Option<bool>,
    pub output_format: FormatChoice,
}

/// Effective settings for one invocation. Quality and scale are always
/// within their clamped ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorConfig {
    pub mode: CompressionMode,
    pub quality: u8,
    pub scale_factor: f64,
    pub keep_metadata: bool,
    pub output_format: FormatChoice,
    pub format_mapping: FormatMapping,
}

impl CompressorConfig {
    pub fn new(mode: CompressionMode, overrides: ConfigOverrides) -> Self {
        let profile = mode.profile();
        Self {
            mode,
            quality: overrides
                .quality
                .map(clamp_quality)
                .unwrap_or(profile.quality),
            scale_factor: overrides
                .scale_factor
                .map(clamp_scale_factor)
                .unwrap_or(profile.scale_factor),
            keep_metadata: overrides.keep_metadata.unwrap_or(profile.keep_metadata),
            output_format: overrides.output_format,
            format_mapping: profile.format_mapping,
        }
    }
}

impl From<CompressionMode> for CompressorConfig {
    fn from(mode: CompressionMode) -> Self {
        CompressorConfig::new(mode, ConfigOverrides::default())
    }
}

/// Clamps a quality override into 1..=100.
pub fn clamp_quality(quality: i64) -> u8 {
    quality.clamp(MIN_QUALITY as i64, MAX_QUALITY as i64) as u8
}

/// Clamps a scale override into 0.1..=1.0; NaN is treated as "no scaling".
pub fn clamp_scale_factor(scale_factor: f64) -> f64 {
    if scale_factor.is_nan() {
        return MAX_SCALE_FACTOR;
    }
    scale_factor.clamp(MIN_SCALE_FACTOR, MAX_SCALE_FACTOR)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub output_path: PathBuf,
    pub original_size: u64,
    pub final_size: u64,
    pub reduction_percent: f64,
}

/// Returns the lower-cased extension if it is one the compressor accepts.
pub fn supported_extension(path: &Path) -> Option<String> {
    let extension = normalize_extension(path.extension()?.to_str()?);
    SUPPORTED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// `{output_dir}/{stem}_{mode}.{format}`
pub fn generate_output_path(
    input_path: &Path,
    output_dir: &Path,
    mode: CompressionMode,
    format: OutputFormat,
) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| CompressionError::UnsupportedFormat("Invalid file name".to_string()))?;

    let output_filename = format!(
        "{}_{}.{}",
        file_stem.to_string_lossy(),
        mode.name(),
        format.extension()
    );
    Ok(output_dir.join(output_filename))
}

pub struct Compressor<'a> {
    config: CompressorConfig,
    logger: &'a Logger,
}

impl<'a> Compressor<'a> {
    pub fn new(config: CompressorConfig, logger: &'a Logger) -> Self {
        verbose!(
            logger,
            "Compressor ready: mode={}, quality={}, scale={}, keep_metadata={}",
            config.mode,
            config.quality,
            config.scale_factor,
            config.keep_metadata
        );
        Self { config, logger }
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    /// Compresses a single image.
    ///
    /// The output lands in `output_dir`, or next to the input when `None`.
    /// The file is written through a temporary sibling and renamed into
    /// place, so a failed call leaves no output behind.
    ///
    /// # Returns
    /// * `Ok(result)` - Output path and before/after sizes
    /// * `Err(CompressionError::UnsupportedFormat)` - Extension not accepted (no I/O done)
    /// * `Err(_)` where `is_io_failure()` - Read, decode, encode or write failed
    pub fn compress_image(
        &self,
        input_path: &Path,
        output_dir: Option<&Path>,
    ) -> Result<CompressionResult> {
        let extension = supported_extension(input_path).ok_or_else(|| {
            CompressionError::UnsupportedFormat(format!(
                "{:?}. Supported formats: {}",
                input_path.extension().unwrap_or_default(),
                SUPPORTED_EXTENSIONS.join(", ")
            ))
        })?;

        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        let original_size = fs::metadata(input_path)
            .map_err(|e| CompressionError::io(input_path, e))?
            .len();

        let mut asset = load_image(input_path)?;
        let output_format = resolve_output_format(
            &extension,
            self.config.output_format,
            self.config.format_mapping,
        );

        if !output_format.supports_alpha() && asset.has_alpha() {
            verbose!(
                self.logger,
                "Dropping alpha channel of {:?} for {} output",
                input_path,
                output_format
            );
            flatten_alpha(&mut asset);
        }

        let (width, height) = asset.dimensions();
        if let Some((new_width, new_height)) = downscale(&mut asset, self.config.scale_factor) {
            verbose!(
                self.logger,
                "Resized from {}x{} to {}x{}",
                width,
                height,
                new_width,
                new_height
            );
        }

        let output_path =
            generate_output_path(input_path, &output_dir, self.config.mode, output_format)?;
        let params = resolve_save_parameters(output_format.extension(), self.config.quality);

        if self.config.keep_metadata {
            if asset.has_metadata() {
                verbose!(self.logger, "Keeping EXIF/ICC metadata of {:?}", input_path);
            }
        } else {
            asset = strip_metadata(asset);
        }

        let bytes = encode(
            &asset,
            output_format.extension(),
            &params,
            &output_path,
            self.logger,
        )?;
        drop(asset);
        write_atomically(&output_path, &bytes)?;

        let final_size = fs::metadata(&output_path)
            .map_err(|e| CompressionError::io(&output_path, e))?
            .len();
        let reduction_percent = calculate_reduction_percent(original_size, final_size);

        info!(self.logger, "Compressed: {:?} -> {:?}", input_path, output_path);
        info!(
            self.logger,
            "Reduction: {} -> {} ({:.2}%)",
            format_file_size(original_size),
            format_file_size(final_size),
            reduction_percent
        );

        Ok(CompressionResult {
            output_path,
            original_size,
            final_size,
            reduction_percent,
        })
    }
}

fn write_atomically(output_path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| CompressionError::DirectoryCreationFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut temp = tempfile::Builder::new()
        .prefix(".img-shrink-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| CompressionError::io(dir, e))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| CompressionError::io(temp.path(), e))?;
    temp.persist(output_path)
        .map_err(|e| CompressionError::io(output_path, e.error))?;
    Ok(())
}
