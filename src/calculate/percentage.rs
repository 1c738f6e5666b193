//! Percentage helpers.

/// Convert a win rate that may be a fraction (0-1) or a percentage (0-100)
/// into a rounded 0-100 percentage.
///
/// Values above 1 are taken as percentages, everything else as a fraction,
/// so exactly `1.0` means 100%. Non-finite input yields 0.
pub fn normalize_win_percentage(rate: f64) -> u32 {
    if !rate.is_finite() {
        return 0;
    }
    let percent = if rate > 1.0 { rate } else { rate * 100.0 };
    percent.round().max(0.0) as u32
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percent_of(part: u32, whole: u32) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(f64::from(part) / f64::from(whole) * 100.0)
    }
}

/// Rounded [`percent_of`].
pub fn rounded_percent(part: u32, whole: u32) -> Option<u32> {
    percent_of(part, whole).map(|p| p.round() as u32)
}

/// Render an optional percentage, with a placeholder for missing data.
pub fn format_percent(percent: Option<u32>) -> String {
    match percent {
        Some(p) => format!("{p}%"),
        None => "--".to_string(),
    }
}
