use crate::error::{CompressionError, Result};
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader};
use std::path::Path;

/// A decoded image together with the ancillary metadata read from its
/// container. Owned by a single compression call and consumed by the encoder.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub image: DynamicImage,
    pub orientation: Orientation,
    pub exif: Option<Vec<u8>>,
    pub icc_profile: Option<Vec<u8>>,
}

impl ImageAsset {
    /// Wraps bare pixels with no metadata attached.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image,
            orientation: Orientation::NoTransforms,
            exif: None,
            icc_profile: None,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn has_metadata(&self) -> bool {
        self.exif.is_some() || self.icc_profile.is_some()
    }
}

/// Decodes an image file, keeping its EXIF orientation, raw EXIF block and
/// ICC profile alongside the pixels.
///
/// # Arguments
/// * `input_path` - Path to the image file to load
///
/// # Returns
/// * `Ok(asset)` - The decoded image and its metadata
/// * `Err(CompressionError::Io)` - If the file cannot be opened or sniffed
/// * `Err(CompressionError::Image)` - If the codec rejects the data
pub fn load_image(input_path: &Path) -> Result<ImageAsset> {
    let reader = ImageReader::open(input_path)
        .map_err(|e| CompressionError::io(input_path, e))?
        .with_guessed_format()
        .map_err(|e| CompressionError::io(input_path, e))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| CompressionError::image(input_path, e))?;

    let orientation = decoder
        .orientation()
        .map_err(|e| CompressionError::image(input_path, e))?;
    let exif = decoder
        .exif_metadata()
        .map_err(|e| CompressionError::image(input_path, e))?;
    let icc_profile = decoder
        .icc_profile()
        .map_err(|e| CompressionError::image(input_path, e))?;

    let image =
        DynamicImage::from_decoder(decoder).map_err(|e| CompressionError::image(input_path, e))?;

    Ok(ImageAsset {
        image,
        orientation,
        exif,
        icc_profile,
    })
}

/// Target dimensions for a uniform downscale, never smaller than 1px per axis.
///
/// ```
/// use img_shrink::processing::new_dimensions;
///
/// assert_eq!(new_dimensions(1000, 1000, 0.6), (600, 600));
/// assert_eq!(new_dimensions(3, 1, 0.1), (1, 1));
/// ```
pub fn new_dimensions(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    let scale = |side: u32| ((side as f64 * scale_factor).floor() as u32).max(1);
    (scale(width), scale(height))
}

/// Drops the alpha channel so the pixels fit a container without
/// transparency. Alpha information is discarded, not composited.
pub fn flatten_alpha(asset: &mut ImageAsset) {
    if !asset.has_alpha() {
        return;
    }

    asset.image = match asset.image.color() {
        image::ColorType::La8 | image::ColorType::La16 => {
            DynamicImage::ImageLuma8(asset.image.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(asset.image.to_rgb8()),
    };
}

/// Resamples the image with Lanczos3 when `scale_factor` is below 1.0.
///
/// Returns the new dimensions when a resize happened.
pub fn downscale(asset: &mut ImageAsset, scale_factor: f64) -> Option<(u32, u32)> {
    if scale_factor >= 1.0 {
        return None;
    }

    let (width, height) = asset.dimensions();
    let (new_width, new_height) = new_dimensions(width, height, scale_factor);
    if (new_width, new_height) == (width, height) {
        return None;
    }

    asset.image = asset
        .image
        .resize_exact(new_width, new_height, FilterType::Lanczos3);
    Some((new_width, new_height))
}
