pub mod batch;
pub mod cli;
pub mod compressor;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod formats;
pub mod logger;
pub mod metadata;
pub mod modes;
pub mod processing;
pub mod report;
pub mod utils;
pub mod validation;

pub use batch::{collect_image_files, compress_batch, BatchSummary};
pub use compressor::{
    clamp_quality, clamp_scale_factor, generate_output_path, CompressionResult, Compressor,
    CompressorConfig, ConfigOverrides,
};
pub use error::{CompressionError, Result};
pub use formats::{
    resolve_output_format, resolve_save_parameters, FormatChoice, OutputFormat, SaveParameters,
};
pub use logger::{LogLevel, Logger};
pub use modes::{resolve_profile, CompressionMode, ModeProfile};
pub use report::{totals, write_report, ReportTotals};
pub use validation::{default_output_dir, ensure_output_dir, validate_input_path, InputKind};
