use crate::constants::{LIBDEFLATER_LEVEL, OXIPNG_PRESET};
use crate::error::{CompressionError, Result};
use crate::formats::SaveParameters;
use crate::formats::OutputFormat;
use crate::logger::Logger;
use crate::metadata::attach_metadata;
use crate::processing::ImageAsset;
use crate::verbose;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use oxipng::{Deflaters, Options, StripChunks};
use std::io::Cursor;
use std::path::Path;

/// Encodes `asset` into an in-memory container using `params`.
///
/// `format` is the output token; it only matters for
/// [`SaveParameters::EncoderDefaults`], where it selects the image crate's
/// encoder. Any EXIF or ICC data still on the asset is written into the
/// container. `output_path` is used for error reporting.
pub fn encode(
    asset: &ImageAsset,
    format: &str,
    params: &SaveParameters,
    output_path: &Path,
    logger: &Logger,
) -> Result<Vec<u8>> {
    let (encoded, container) = match *params {
        SaveParameters::Jpeg { quality, .. } => (
            encode_jpeg(asset, quality, output_path, logger)?,
            OutputFormat::Jpeg,
        ),
        SaveParameters::Png {
            optimize,
            compression_level,
        } => (
            encode_png(asset, optimize, compression_level, output_path, logger)?,
            OutputFormat::Png,
        ),
        SaveParameters::WebP { quality, method } => (
            encode_webp(&asset.image, quality, method, output_path)?,
            OutputFormat::WebP,
        ),
        SaveParameters::EncoderDefaults => {
            return encode_with_defaults(&asset.image, format, output_path)
        }
    };

    if asset.has_metadata() {
        attach_metadata(encoded, container, asset, output_path)
    } else {
        Ok(encoded)
    }
}

fn attach_icc<E: ImageEncoder>(encoder: &mut E, asset: &ImageAsset, logger: &Logger) {
    if let Some(icc) = &asset.icc_profile {
        if let Err(e) = encoder.set_icc_profile(icc.clone()) {
            verbose!(logger, "ICC profile not embedded: {}", e);
        }
    }
}

// The baseline encoder in `image` ignores the progressive/optimize hints;
// quality is the only knob it exposes.
fn encode_jpeg(
    asset: &ImageAsset,
    quality: u8,
    output_path: &Path,
    logger: &Logger,
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    attach_icc(&mut encoder, asset, logger);

    let result = match asset.image.color() {
        ColorType::L8 => {
            let luma = asset.image.to_luma8();
            encoder.write_image(luma.as_raw(), luma.width(), luma.height(), ExtendedColorType::L8)
        }
        _ => {
            let rgb = asset.image.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        }
    };
    result.map_err(|e| CompressionError::image(output_path, e))?;
    Ok(buffer)
}

fn encode_png(
    asset: &ImageAsset,
    optimize: bool,
    compression_level: u8,
    output_path: &Path,
    logger: &Logger,
) -> Result<Vec<u8>> {
    let compression = if compression_level >= 7 {
        CompressionType::Best
    } else if compression_level >= 3 {
        CompressionType::Default
    } else {
        CompressionType::Fast
    };

    let mut buffer = Vec::new();
    let mut encoder =
        PngEncoder::new_with_quality(&mut buffer, compression, PngFilterType::Adaptive);
    attach_icc(&mut encoder, asset, logger);

    let image = &asset.image;
    encoder
        .write_image(
            image.as_bytes(),
            image.width(),
            image.height(),
            image.color().into(),
        )
        .map_err(|e| CompressionError::image(output_path, e))?;

    if !optimize {
        return Ok(buffer);
    }

    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_LEVEL,
    };
    options.strip = if asset.has_metadata() {
        StripChunks::None
    } else {
        StripChunks::Safe
    };

    oxipng::optimize_from_memory(&buffer, &options).map_err(|e| {
        CompressionError::PngOptimization {
            path: output_path.to_path_buf(),
            message: e.to_string(),
        }
    })
}

fn encode_webp(image: &DynamicImage, quality: u8, method: u8, output_path: &Path) -> Result<Vec<u8>> {
    let webp_error = |message: String| CompressionError::WebpEncoding {
        path: output_path.to_path_buf(),
        message,
    };

    let mut config = webp::WebPConfig::new()
        .map_err(|_| webp_error("failed to initialise encoder config".to_string()))?;
    config.lossless = 0;
    config.quality = f32::from(quality);
    config.method = i32::from(method);

    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
        let memory = encoder
            .encode_advanced(&config)
            .map_err(|e| webp_error(format!("{:?}", e)))?;
        Ok(memory.to_vec())
    } else {
        let rgb = image.to_rgb8();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height());
        let memory = encoder
            .encode_advanced(&config)
            .map_err(|e| webp_error(format!("{:?}", e)))?;
        Ok(memory.to_vec())
    }
}

fn encode_with_defaults(image: &DynamicImage, format: &str, output_path: &Path) -> Result<Vec<u8>> {
    let image_format = ImageFormat::from_extension(format)
        .ok_or_else(|| CompressionError::UnsupportedFormat(format.to_string()))?;

    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, image_format)
        .map_err(|e| CompressionError::image(output_path, e))?;
    Ok(cursor.into_inner())
}
