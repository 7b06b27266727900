use img_shrink::compressor::supported_extension;
use img_shrink::formats::normalize_extension;
use img_shrink::processing::new_dimensions;
use img_shrink::utils::{calculate_reduction_percent, format_file_size};
use img_shrink::{
    clamp_quality, clamp_scale_factor, resolve_output_format, CompressionMode, FormatChoice,
    OutputFormat,
};
use proptest::prelude::*;
use std::path::Path;

fn any_mode() -> impl Strategy<Value = CompressionMode> {
    prop_oneof![
        Just(CompressionMode::Light),
        Just(CompressionMode::Moderate),
        Just(CompressionMode::Aggressive),
    ]
}

fn any_choice() -> impl Strategy<Value = FormatChoice> {
    prop_oneof![
        Just(FormatChoice::Auto),
        Just(FormatChoice::Jpg),
        Just(FormatChoice::Png),
        Just(FormatChoice::Webp),
    ]
}

proptest! {
    #[test]
    fn new_dimensions_never_zero(
        width in 1u32..=10_000u32,
        height in 1u32..=10_000u32,
        scale in 0.1f64..=1.0f64
    ) {
        let (w, h) = new_dimensions(width, height, scale);
        prop_assert!(w >= 1 && h >= 1);
        prop_assert!(w <= width && h <= height);
    }

    #[test]
    fn new_dimensions_preserve_aspect_ratio(
        width in 10u32..=4000u32,
        height in 10u32..=4000u32,
        scale in 0.1f64..=1.0f64
    ) {
        let (w, h) = new_dimensions(width, height, scale);
        // Both sides are floored independently, so each may be off by one.
        let expected_h = w as f64 * height as f64 / width as f64;
        prop_assert!((h as f64 - expected_h).abs() <= 1.0 + height as f64 / width as f64);
    }

    #[test]
    fn full_scale_keeps_dimensions(width in 1u32..=10_000u32, height in 1u32..=10_000u32) {
        prop_assert_eq!(new_dimensions(width, height, 1.0), (width, height));
    }

    #[test]
    fn quality_clamp_in_range(quality in any::<i64>()) {
        let clamped = clamp_quality(quality);
        prop_assert!((1..=100).contains(&clamped));
        if (1..=100).contains(&quality) {
            prop_assert_eq!(i64::from(clamped), quality);
        }
    }

    #[test]
    fn scale_clamp_in_range(scale in any::<f64>()) {
        let clamped = clamp_scale_factor(scale);
        prop_assert!((0.1..=1.0).contains(&clamped));
    }

    #[test]
    fn explicit_format_always_wins(
        extension in prop_oneof!["jpg", "jpeg", "png", "webp", "JPG", "PNG"],
        mode in any_mode(),
        choice in any_choice()
    ) {
        let mapping = mode.profile().format_mapping;
        let extension = normalize_extension(&extension);
        let first = resolve_output_format(&extension, choice, mapping);
        let second = resolve_output_format(&extension, choice, mapping);
        prop_assert_eq!(first, second);

        if let Some(explicit) = choice.explicit() {
            prop_assert_eq!(first, explicit);
        } else if mode == CompressionMode::Aggressive {
            prop_assert_eq!(first, OutputFormat::WebP);
        }
    }

    #[test]
    fn supported_extension_is_case_insensitive(
        extension in prop_oneof!["jpg", "jpeg", "png", "webp"],
        upper in any::<bool>()
    ) {
        let extension = if upper { extension.to_uppercase() } else { extension };
        let file_name = format!("photo.{}", extension);
        prop_assert_eq!(
            supported_extension(Path::new(&file_name)),
            Some(extension.to_lowercase())
        );
    }

    #[test]
    fn reduction_percent_bounded_above(original in 1u64..=u32::MAX as u64, final_size in 0u64..=u32::MAX as u64) {
        let reduction = calculate_reduction_percent(original, final_size);
        prop_assert!(reduction <= 100.0);
        prop_assert_eq!(reduction >= 0.0, final_size <= original);
    }

    #[test]
    fn format_file_size_has_unit(bytes in any::<u64>()) {
        let formatted = format_file_size(bytes);
        prop_assert!(formatted.ends_with('B'));
    }
}
