pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const MIN_SCALE_FACTOR: f64 = 0.1;
pub const MAX_SCALE_FACTOR: f64 = 1.0;

/// Input extensions accepted by the compressor, lower-case and without dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// zlib level used by the PNG encoder before the optimisation pass.
pub const PNG_COMPRESSION_LEVEL: u8 = 9;
pub const OXIPNG_PRESET: u8 = 4;
pub const LIBDEFLATER_LEVEL: u8 = 12;

/// libwebp `method`: 0 is fastest, 6 is the slowest and smallest.
pub const WEBP_METHOD: u8 = 6;

/// Output directory created next to the input directory in batch mode.
pub const DEFAULT_BATCH_OUTPUT_DIR: &str = "compressed";

// Results table layout
pub const REPORT_WIDTH: usize = 80;
pub const REPORT_NAME_WIDTH: usize = 30;
pub const REPORT_SIZE_WIDTH: usize = 15;
pub const REPORT_REDUCTION_WIDTH: usize = 10;

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const ERROR_PREFIX: &str = "❌";
pub const VERBOSE_PREFIX: &str = "🔍";
