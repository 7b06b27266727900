//! Output container selection and codec save parameters
//!
//! Both resolvers here are pure functions: the orchestrator calls
//! `resolve_output_format` first and feeds its result to
//! `resolve_save_parameters`.

use crate::constants::{PNG_COMPRESSION_LEVEL, WEBP_METHOD};
use crate::modes::FormatMapping;
use clap::ValueEnum;
use std::fmt;

/// Supported output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JPEG format with lossy compression
    Jpeg,
    /// PNG format with lossless compression
    Png,
    /// WebP format with modern compression
    WebP,
}

impl OutputFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn supports_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

/// Value of the `--format` option: `auto` defers to the mode's mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatChoice {
    #[default]
    Auto,
    Jpg,
    Png,
    Webp,
}

impl FormatChoice {
    pub fn explicit(&self) -> Option<OutputFormat> {
        match self {
            FormatChoice::Auto => None,
            FormatChoice::Jpg => Some(OutputFormat::Jpeg),
            FormatChoice::Png => Some(OutputFormat::Png),
            FormatChoice::Webp => Some(OutputFormat::WebP),
        }
    }
}

/// Normalises an extension token: lower-case, leading dot removed.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// Picks the output container for an input extension.
///
/// An explicit choice always wins. With `auto` the mode's mapping decides,
/// and extensions the mapping does not know fall back to JPEG.
pub fn resolve_output_format(
    input_extension: &str,
    configured: FormatChoice,
    mapping: FormatMapping,
) -> OutputFormat {
    if let Some(format) = configured.explicit() {
        return format;
    }

    let extension = normalize_extension(input_extension);
    mapping
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, format)| *format)
        .unwrap_or(OutputFormat::Jpeg)
}

/// Codec-specific parameters handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveParameters {
    Jpeg {
        quality: u8,
        optimize: bool,
        progressive: bool,
    },
    Png {
        optimize: bool,
        compression_level: u8,
    },
    WebP {
        quality: u8,
        method: u8,
    },
    /// No codec-specific settings; the encoder's defaults apply.
    EncoderDefaults,
}

pub fn resolve_save_parameters(format: &str, quality: u8) -> SaveParameters {
    match normalize_extension(format).as_str() {
        "jpg" | "jpeg" => SaveParameters::Jpeg {
            quality,
            optimize: true,
            progressive: true,
        },
        "png" => SaveParameters::Png {
            optimize: true,
            compression_level: PNG_COMPRESSION_LEVEL,
        },
        "webp" => SaveParameters::WebP {
            quality,
            method: WEBP_METHOD,
        },
        _ => SaveParameters::EncoderDefaults,
    }
}
