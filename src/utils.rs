//! Size formatting and reduction arithmetic shared by the orchestrator and
//! the report.

/// Format file size in human-readable format
///
/// Units switch at exact powers of 1024, so 1023 bytes is "1023 B" and 1024
/// bytes is "1.00 KB".
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.20 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Calculate size reduction as a percentage
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `final_size` - Compressed file size in bytes
///
/// # Returns
/// * Reduction as percentage (positive means smaller, negative means the
///   output grew). An empty original reports 0.0.
pub fn calculate_reduction_percent(original_size: u64, final_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - final_size as f64) / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5.00 TB");
    }

    #[test]
    fn test_calculate_reduction_percent() {
        assert_eq!(calculate_reduction_percent(1000, 800), 20.0);
        assert_eq!(calculate_reduction_percent(1000, 1200), -20.0);
        assert_eq!(calculate_reduction_percent(1000, 1000), 0.0);
        assert_eq!(calculate_reduction_percent(0, 500), 0.0);
    }
}
