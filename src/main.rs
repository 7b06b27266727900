use anyhow::{Context, Result};
use clap::Parser;
use img_shrink::cli::Args;
use img_shrink::constants::SUCCESS_PREFIX;
use img_shrink::{
    collect_image_files, compress_batch, default_output_dir, ensure_output_dir,
    validate_input_path, write_report, CompressionError, CompressionResult, Compressor,
    CompressorConfig, InputKind, Logger,
};
use img_shrink::{error, info, verbose, warn};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

enum Outcome {
    Completed,
    Cancelled,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let logger = Logger::stderr(args.log_level());

    match run(&args, &logger) {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => {
            eprintln!("Operation cancelled by user.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(logger, "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, logger: &Logger) -> Result<Outcome> {
    let kind = validate_input_path(&args.input)
        .with_context(|| format!("cannot use input {:?}", args.input))?;

    let output_dir = match &args.output {
        Some(dir) => dir.clone(),
        None => default_output_dir(&args.input, kind)
            .with_context(|| format!("cannot resolve output directory for {:?}", args.input))?,
    };
    ensure_output_dir(&output_dir, logger)
        .with_context(|| format!("cannot prepare output directory {:?}", output_dir))?;

    let config = CompressorConfig::new(args.mode, args.overrides());
    log_clamped_overrides(args, &config, logger);

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        warn!(logger, "Could not install Ctrl-C handler: {}", e);
    }

    info!(logger, "Mode: {}", args.mode.description());
    let compressor = Compressor::new(config, logger);

    match kind {
        InputKind::File => {
            let result = compressor
                .compress_image(&args.input, Some(&output_dir))
                .with_context(|| format!("failed to compress {:?}", args.input))?;
            print_report(&[result])?;
        }
        InputKind::Directory => {
            let files = collect_image_files(&args.input, logger)
                .with_context(|| format!("cannot scan {:?}", args.input))?;
            let summary = compress_batch(&compressor, &files, &output_dir, &cancel);

            if !summary.results.is_empty() {
                print_report(&summary.results)?;
            }
            if summary.cancelled {
                return Ok(Outcome::Cancelled);
            }
            if summary.results.is_empty() {
                return Err(CompressionError::NoImagesProcessed)
                    .with_context(|| format!("nothing compressed in {:?}", args.input));
            }
            info!(
                logger,
                "{} Compressed {} of {} images into {:?}",
                SUCCESS_PREFIX,
                summary.processed(),
                files.len(),
                output_dir
            );
        }
    }

    if cancel.load(Ordering::SeqCst) {
        return Ok(Outcome::Cancelled);
    }
    Ok(Outcome::Completed)
}

fn log_clamped_overrides(args: &Args, config: &CompressorConfig, logger: &Logger) {
    if let Some(quality) = args.quality {
        if quality != i64::from(config.quality) {
            verbose!(logger, "Quality {} clamped to {}", quality, config.quality);
        }
    }
    if let Some(scale) = args.scale {
        if scale != config.scale_factor {
            verbose!(logger, "Scale {} clamped to {}", scale, config.scale_factor);
        }
    }
}

fn print_report(results: &[CompressionResult]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, results).context("failed to write report")?;
    out.flush().context("failed to write report")?;
    Ok(())
}
