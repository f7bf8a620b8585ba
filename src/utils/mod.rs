//! Monetary helpers shared by the engine and the CLI
//!
//! The engine rounds only the weighted average after a buy and the final
//! tax, both through `round_currency`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for every monetary amount
pub const CURRENCY_DP: u32 = 2;

/// Round to two decimal places, halves away from zero (round-half-up).
///
/// # Examples
/// ```
/// use capital_gains::utils::round_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_currency(dec!(13.335)), dec!(13.34));
/// assert_eq!(round_currency(dec!(13.3333)), dec!(13.33));
/// assert_eq!(round_currency(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "R$ " prefix (Brazilian Real)
    BRL,
    /// No currency symbol (for table cells)
    None,
}

/// Core formatting function.
///
/// Formats a Decimal value using Brazilian locale conventions:
/// - Thousands separator: `.` (period)
/// - Decimal separator: `,` (comma)
///
/// The value is rounded half-up to two places first.
pub fn format_currency_with_symbol(value: Decimal, symbol: CurrencySymbol) -> String {
    let rounded = round_currency(value);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    // Add thousands separators (.) to integer part
    let digits: Vec<char> = integer_part.chars().collect();
    let mut with_separators = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            with_separators.push('.');
        }
        with_separators.push(*c);
    }

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::BRL => "R$ ",
        CurrencySymbol::None => "",
    };

    format!("{}{}{},{}", prefix, sign, with_separators, decimal_part)
}

/// Format as Brazilian Real with symbol: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use capital_gains::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
/// assert_eq!(format_currency(dec!(-500)), "R$ -500,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_symbol(value, CurrencySymbol::BRL)
}

/// Format number only (no symbol): "1.234,56"
pub fn format_decimal_br(value: Decimal) -> String {
    format_currency_with_symbol(value, CurrencySymbol::None)
}
