//! Display formatting for token amounts and USD annotations.
//!
//! All rounding is half-away-from-zero at the displayed precision, so
//! `2.25K` tokens show as `2.3K` rather than banker's-rounded `2.2K`.

use incinerator_types::TokenAmount;

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Round `value` to `decimals` places and render it with exactly that many.
fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * scale).round() / scale)
}

/// Format a token amount with a metric suffix.
///
/// ```text
/// 1_500_000 tokens -> "1.5M"
///     2_500 tokens -> "2.5K"
///         7 tokens -> "7"
/// ```
///
/// Zero renders as `"0"`; callers pass `TokenAmount::default()` for values
/// that have not been read yet.
pub fn format_tokens(amount: TokenAmount) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }
    let tokens = amount.to_tokens_f64();
    if tokens >= MILLION {
        format!("{}M", fixed(tokens / MILLION, 1))
    } else if tokens >= THOUSAND {
        format!("{}K", fixed(tokens / THOUSAND, 1))
    } else {
        fixed(tokens, 0)
    }
}

/// Approximate USD value of `amount` at `price`, or `None` when either is
/// missing or zero.
///
/// ```text
/// usd >= 1000 -> "~$1.2K"
/// usd >= 1    -> "~$12.34"
/// otherwise   -> "~$0.0123"
/// ```
pub fn format_usd(amount: TokenAmount, price: Option<f64>) -> Option<String> {
    let price = price.filter(|p| p.is_finite() && *p != 0.0)?;
    if amount.is_zero() {
        return None;
    }
    let usd = amount.to_tokens_f64() * price;
    let text = if usd >= THOUSAND {
        format!("~${}K", fixed(usd / THOUSAND, 1))
    } else if usd >= 1.0 {
        format!("~${}", fixed(usd, 2))
    } else {
        format!("~${}", fixed(usd, 4))
    };
    Some(text)
}
