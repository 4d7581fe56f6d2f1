// One decimal place the way a JS `toFixed(1)` does it: the nearest tenth to the exact binary
// value, with exact ties (only x.25 / x.75 are representable) going up.
pub fn to_fixed_one(val: f64) -> String {
    let quarters = val * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return format!("{:.1}", (val * 10.0).ceil() / 10.0);
    }

    format!("{val:.1}")
}

pub fn round_to_one_decimal(val: f64) -> f64 {
    to_fixed_one(val).parse().unwrap_or(val)
}

// True if the cell holds something that reads as a number at all. Blank cells do not count.
pub fn is_numeric_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map(|v| !v.is_nan()).unwrap_or(false)
}

// Scores are whole, non-negative points. "21" and "21.0" are both fine, "-3" or "10.5" are not.
pub fn parse_score(cell: &str) -> Option<u32> {
    if !is_numeric_cell(cell) { return None; }

    let val: f64 = cell.trim().parse().ok()?;
    if !val.is_finite() || val < 0.0 || val.fract() != 0.0 || val > u32::MAX as f64 {
        return None;
    }

    Some(val as u32)
}
