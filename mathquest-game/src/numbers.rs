//! Numeric helpers shared by the generator and the evaluator.

use num_traits::cast::cast;

/// Convert a whole-valued f64 to i64, returning `None` for fractional or out-of-range values.
#[must_use]
pub fn whole_f64_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    cast::<f64, i64>(value)
}

/// Render a quantity the way it appears in problem text: whole numbers without a
/// decimal point, other values with at most four decimals and no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    if let Some(whole) = whole_f64_to_i64(value) {
        return whole.to_string();
    }
    if !value.is_finite() {
        return String::from("?");
    }
    let fixed = format!("{value:.4}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render an integer with comma thousands separators, as scales are written on maps.
#[must_use]
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
