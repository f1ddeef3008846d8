//! Report Line Formatting
//!
//! One line per benchmarked operation:
//!
//! ```text
//! test: negative_bench_mid  ... bench: 1,234,567 ns/iter
//! ```
//!
//! The name is left-justified to [`NAME_WIDTH`] columns (longer names are not
//! truncated) and the value is rounded to whole nanoseconds and grouped by
//! thousands.

/// Column width the operation name is padded to
pub const NAME_WIDTH: usize = 15;

/// Group the integer part of `value` with `,` every three digits.
///
/// The value is rounded to the nearest integer first. Negative values keep
/// their sign; non-finite values are rendered as-is.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render one report line (without the trailing newline).
pub fn report_line(name: &str, reported_ns: f64, unit: &str) -> String {
    format!(
        "test: {:<width$}  ... bench: {} {}",
        name,
        format_thousands(reported_ns),
        unit,
        width = NAME_WIDTH
    )
}
