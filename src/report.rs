use crate::compressor::CompressionResult;
use crate::constants::{
    REPORT_NAME_WIDTH, REPORT_REDUCTION_WIDTH, REPORT_SIZE_WIDTH, REPORT_WIDTH,
};
use crate::utils::{calculate_reduction_percent, format_file_size};
use std::io::{self, Write};

/// Aggregate of every processed file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportTotals {
    pub original_size: u64,
    pub final_size: u64,
    pub reduction_percent: f64,
}

pub fn totals(results: &[CompressionResult]) -> ReportTotals {
    let original_size = results.iter().map(|r| r.original_size).sum();
    let final_size = results.iter().map(|r| r.final_size).sum();
    ReportTotals {
        original_size,
        final_size,
        reduction_percent: calculate_reduction_percent(original_size, final_size),
    }
}

fn write_row<W: Write>(
    out: &mut W,
    name: &str,
    original: &str,
    final_size: &str,
    reduction: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<name_w$}{:>size_w$}{:>size_w$}{:>red_w$}",
        name,
        original,
        final_size,
        reduction,
        name_w = REPORT_NAME_WIDTH,
        size_w = REPORT_SIZE_WIDTH,
        red_w = REPORT_REDUCTION_WIDTH
    )
}

/// Writes the fixed-width results table followed by a TOTAL row.
///
/// Rows are printed in the order given, one per result, keyed by the
/// output file's basename.
pub fn write_report<W: Write>(out: &mut W, results: &[CompressionResult]) -> io::Result<()> {
    let heavy = "=".repeat(REPORT_WIDTH);
    let light = "-".repeat(REPORT_WIDTH);

    writeln!(out, "{}", heavy)?;
    write_row(out, "FILE", "ORIGINAL", "FINAL", "REDUCTION")?;
    writeln!(out, "{}", light)?;

    for result in results {
        let name = result
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        write_row(
            out,
            &name,
            &format_file_size(result.original_size),
            &format_file_size(result.final_size),
            &format!("{:.2}%", result.reduction_percent),
        )?;
    }

    let summary = totals(results);
    writeln!(out, "{}", light)?;
    write_row(
        out,
        "TOTAL",
        &format_file_size(summary.original_size),
        &format_file_size(summary.final_size),
        &format!("{:.2}%", summary.reduction_percent),
    )?;
    writeln!(out, "{}", heavy)
}
