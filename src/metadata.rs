//! EXIF and ICC handling around re-encoding.
//!
//! Stripping bakes the EXIF orientation into the pixel grid before the
//! metadata is dropped, so the output renders the same way the input did.
//! Kept metadata is re-attached to the encoded container afterwards; the
//! pixels stay as stored and the EXIF orientation tag keeps describing them.

use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;
use crate::processing::ImageAsset;
use image::metadata::Orientation;
use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF, ImageICC};
use std::path::Path;

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Normalises orientation and discards EXIF and ICC data, leaving only the
/// pixel grid (same color type, post-rotation dimensions).
pub fn strip_metadata(mut asset: ImageAsset) -> ImageAsset {
    bake_orientation(&mut asset);
    ImageAsset::from_image(asset.image)
}

/// Applies the recorded orientation to the pixels and resets it.
pub fn bake_orientation(asset: &mut ImageAsset) {
    if asset.orientation != Orientation::NoTransforms {
        asset.image.apply_orientation(asset.orientation);
        asset.orientation = Orientation::NoTransforms;
    }
}

// Containers store the bare TIFF structure; some decoders hand it back with
// the APP1 identifier still in front.
fn tiff_block(exif: &[u8]) -> Bytes {
    Bytes::copy_from_slice(exif.strip_prefix(EXIF_HEADER).unwrap_or(exif))
}

/// Re-attaches the asset's EXIF block to an encoded JPEG, PNG or WebP file.
///
/// WebP also gets the ICC profile here since libwebp has no way to take one;
/// JPEG and PNG receive theirs from the image encoders.
pub fn attach_metadata(
    encoded: Vec<u8>,
    format: OutputFormat,
    asset: &ImageAsset,
    output_path: &Path,
) -> Result<Vec<u8>> {
    let embed_error = |message: String| CompressionError::MetadataEmbedding {
        path: output_path.to_path_buf(),
        message,
    };

    let exif = asset.exif.as_deref().map(tiff_block);
    let bytes = Bytes::from(encoded);
    let mut output = Vec::with_capacity(bytes.len());

    let written = match format {
        OutputFormat::Jpeg => {
            let mut jpeg = Jpeg::from_bytes(bytes).map_err(|e| embed_error(e.to_string()))?;
            jpeg.set_exif(exif);
            jpeg.encoder().write_to(&mut output)
        }
        OutputFormat::Png => {
            let mut png = Png::from_bytes(bytes).map_err(|e| embed_error(e.to_string()))?;
            png.set_exif(exif);
            png.encoder().write_to(&mut output)
        }
        OutputFormat::WebP => {
            let mut webp = WebP::from_bytes(bytes).map_err(|e| embed_error(e.to_string()))?;
            webp.set_exif(exif);
            webp.set_icc_profile(asset.icc_profile.as_deref().map(Bytes::copy_from_slice));
            webp.encoder().write_to(&mut output)
        }
    };
    written.map_err(|e| embed_error(e.to_string()))?;

    Ok(output)
}
