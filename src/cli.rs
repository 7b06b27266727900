use crate::compressor::ConfigOverrides;
use crate::formats::FormatChoice;
use crate::logger::LogLevel;
use crate::modes::CompressionMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-shrink",
    about = "Compress JPEG, PNG and WebP images using named compression modes",
    long_about = "img-shrink resizes, strips metadata from and re-encodes images according to a \
                  compression mode. A single file is compressed next to itself; a directory is \
                  compressed into a sibling 'compressed' directory. A results table with a TOTAL \
                  row is printed when done.",
    version,
    after_help = "MODES:\n  \
    light       quality 85, no resize, keeps metadata, keeps format\n  \
    moderate    quality 70, 80% size, strips metadata, keeps format\n  \
    aggressive  quality 50, 60% size, strips metadata, converts to WebP\n\n\
EXAMPLES:\n  \
    img-shrink photo.jpg\n  \
    img-shrink ./photos -m aggressive -o ./small\n  \
    img-shrink logo.png -m light --format webp -q 90 -v"
)]
pub struct Args {
    #[arg(help = "Image file or directory of images")]
    pub input: PathBuf,

    #[arg(
        short = 'm',
        long,
        value_enum,
        default_value_t = CompressionMode::Moderate,
        help = "Compression mode"
    )]
    pub mode: CompressionMode,

    #[arg(
        short = 'o',
        long,
        help = "Output directory",
        long_help = "Directory the compressed files are written to. Defaults to a sibling \
                     'compressed' directory for directory input and to the input's own \
                     directory for a single file."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        allow_negative_numbers = true,
        help = "Quality override (clamped to 1-100)"
    )]
    pub quality: Option<i64>,

    #[arg(
        short = 's',
        long,
        allow_negative_numbers = true,
        help = "Scale factor override (clamped to 0.1-1.0)"
    )]
    pub scale: Option<f64>,

    #[arg(
        long,
        conflicts_with = "strip_metadata",
        help = "Keep EXIF and ICC metadata regardless of mode"
    )]
    pub keep_metadata: bool,

    #[arg(long, help = "Strip EXIF and ICC metadata regardless of mode")]
    pub strip_metadata: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = FormatChoice::Auto,
        help = "Output format; 'auto' follows the mode"
    )]
    pub format: FormatChoice,

    #[arg(short = 'v', long, help = "Show progress and debug output")]
    pub verbose: bool,
}

impl Args {
    /// `None` when neither metadata flag was given.
    pub fn keep_metadata_override(&self) -> Option<bool> {
        match (self.keep_metadata, self.strip_metadata) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            quality: self.quality,
            scale_factor: self.scale,
            keep_metadata: self.keep_metadata_override(),
            output_format: self.format,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Warn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("img-shrink").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["photo.jpg"]);
        assert_eq!(args.input, PathBuf::from("photo.jpg"));
        assert_eq!(args.mode, CompressionMode::Moderate);
        assert_eq!(args.format, FormatChoice::Auto);
        assert_eq!(args.output, None);
        assert_eq!(args.overrides(), ConfigOverrides::default());
        assert_eq!(args.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "dir", "-m", "aggressive", "-o", "out", "-q", "-5", "-s", "0.5", "--format", "png",
            "--keep-metadata", "-v",
        ]);
        assert_eq!(args.mode, CompressionMode::Aggressive);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        let overrides = args.overrides();
        assert_eq!(overrides.quality, Some(-5));
        assert_eq!(overrides.scale_factor, Some(0.5));
        assert_eq!(overrides.keep_metadata, Some(true));
        assert_eq!(overrides.output_format, FormatChoice::Png);
        assert_eq!(args.log_level(), LogLevel::Verbose);
    }

    #[test]
    fn test_strip_metadata_flag() {
        let args = parse(&["a.jpg", "-m", "light", "--strip-metadata"]);
        assert_eq!(args.keep_metadata_override(), Some(false));
    }

    #[test]
    fn test_metadata_flags_conflict() {
        let result =
            Args::try_parse_from(["img-shrink", "a.jpg", "--keep-metadata", "--strip-metadata"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = Args::try_parse_from(["img-shrink", "a.jpg", "-m", "extreme"]);
        assert!(result.is_err());
    }
}
