//! Distance to confidence transform
//!
//! `confidence = 100 / (1 + d)` rounded to two decimals. This is a
//! presentation score, not a probability.

/// Smallest reportable confidence after rounding
pub const MIN_CONFIDENCE: f64 = 0.01;

/// Unrounded transform. Strictly decreasing for `d >= 0`, `100` at `d = 0`.
#[inline]
pub fn raw_confidence(distance: f64) -> f64 {
    100.0 / (1.0 + distance)
}

/// Confidence rounded to two decimals.
///
/// Values that would round to zero are reported as [`MIN_CONFIDENCE`] so the
/// score stays in `(0, 100]`.
#[inline]
pub fn confidence(distance: f64) -> f64 {
    round2(raw_confidence(distance)).max(MIN_CONFIDENCE)
}

/// Round to two decimals from the exact binary value, ties to even.
///
/// `3.125` is exactly representable and becomes `3.12`. Scaling by 100 first
/// would lose the tie and give `3.13`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Render as a percentage: `100.0%`, `50.0%`, `66.67%`
pub fn format_confidence(confidence: f64) -> String {
    if confidence.fract() == 0.0 {
        format!("{:.1}%", confidence)
    } else {
        format!("{}%", confidence)
    }
}
