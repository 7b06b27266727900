//! Named compression presets.
//!
//! Each [`CompressionMode`] resolves to a static [`ModeProfile`] bundling the
//! default quality, scale factor, metadata policy and the per-extension
//! output format mapping used when the output format is `auto`.

use crate::formats::OutputFormat;
use crate::logger::Logger;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Input extension token to output format.
pub type FormatMapping = &'static [(&'static str, OutputFormat)];

const KEEP_FORMAT: FormatMapping = &[
    ("jpg", OutputFormat::Jpeg),
    ("jpeg", OutputFormat::Jpeg),
    ("png", OutputFormat::Png),
    ("webp", OutputFormat::WebP),
];

const ALL_TO_WEBP: FormatMapping = &[
    ("jpg", OutputFormat::WebP),
    ("jpeg", OutputFormat::WebP),
    ("png", OutputFormat::WebP),
    ("webp", OutputFormat::WebP),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    pub quality: u8,
    pub scale_factor: f64,
    pub keep_metadata: bool,
    pub format_mapping: FormatMapping,
}

const LIGHT: ModeProfile = ModeProfile {
    quality: 85,
    scale_factor: 1.0,
    keep_metadata: true,
    format_mapping: KEEP_FORMAT,
};

const MODERATE: ModeProfile = ModeProfile {
    quality: 70,
    scale_factor: 0.8,
    keep_metadata: false,
    format_mapping: KEEP_FORMAT,
};

const AGGRESSIVE: ModeProfile = ModeProfile {
    quality: 50,
    scale_factor: 0.6,
    keep_metadata: false,
    format_mapping: ALL_TO_WEBP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CompressionMode {
    Light,
    #[default]
    Moderate,
    Aggressive,
}

impl CompressionMode {
    pub fn name(&self) -> &'static str {
        match self {
            CompressionMode::Light => "light",
            CompressionMode::Moderate => "moderate",
            CompressionMode::Aggressive => "aggressive",
        }
    }

    pub fn profile(&self) -> &'static ModeProfile {
        match self {
            CompressionMode::Light => &LIGHT,
            CompressionMode::Moderate => &MODERATE,
            CompressionMode::Aggressive => &AGGRESSIVE,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CompressionMode::Light => "Light compression (high quality)",
            CompressionMode::Moderate => "Moderate compression (balanced)",
            CompressionMode::Aggressive => "Aggressive compression (smallest size)",
        }
    }

    /// Parses a mode name, falling back to [`CompressionMode::Moderate`] with
    /// a warning when the name is not recognised.
    pub fn resolve(name: &str, logger: &Logger) -> Self {
        match name.parse() {
            Ok(mode) => mode,
            Err(_) => {
                crate::warn!(logger, "Mode '{}' not recognised. Using 'moderate'.", name);
                CompressionMode::Moderate
            }
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(CompressionMode::Light),
            "moderate" => Ok(CompressionMode::Moderate),
            "aggressive" => Ok(CompressionMode::Aggressive),
            other => Err(format!("unknown compression mode: {}", other)),
        }
    }
}

/// Looks up the profile for a mode name; unknown names fall back to the
/// moderate profile and never fail.
pub fn resolve_profile(mode_name: &str, logger: &Logger) -> &'static ModeProfile {
    CompressionMode::resolve(mode_name, logger).profile()
}
