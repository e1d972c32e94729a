//! Currency rendering for reports and listings.

/// Formats an amount with a symbol prefix and exactly two decimal places,
/// e.g. `$50.00`. Negative amounts carry the sign before the symbol.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}
