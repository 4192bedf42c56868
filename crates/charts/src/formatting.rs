//! Formatting helpers for tooltip lines and axis ticks.
//!
//! Currency is rendered with zero decimal places and locale digit grouping
//! (`R$ 1.234.567` by default); percentages with one decimal place.

use crate::config::CurrencyFormat;

/// Formats a currency amount rounded to whole units, e.g. `R$ 1.234.567`.
pub fn fmt_currency(amount: f64, currency: &CurrencyFormat) -> String {
    let rounded = amount.round();
    let digits = group_digits(rounded.abs() as u64, currency.thousands_separator);
    if rounded < 0.0 {
        format!("-{} {}", currency.symbol, digits)
    } else {
        format!("{} {}", currency.symbol, digits)
    }
}

/// Formats a percentage value (already in percent units) as `XX.X%`.
pub fn fmt_pct(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Share of `value` in `total` as a whole percentage. A zero total yields 0.
pub fn share_pct(value: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }
    (value / total * 100.0).round() as i64
}

/// Primary-axis tick in millions, e.g. `R$ 1.2M`.
pub fn fmt_millions_tick(value: f64, symbol: &str) -> String {
    format!("{} {:.1}M", symbol, value / 1_000_000.0)
}

/// Secondary-axis tick in thousands, e.g. `R$ 350K`.
pub fn fmt_thousands_tick(value: f64, symbol: &str) -> String {
    format!("{} {:.0}K", symbol, value / 1_000.0)
}

fn group_digits(value: u64, separator: char) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
