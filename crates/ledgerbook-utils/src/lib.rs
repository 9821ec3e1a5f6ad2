//! Formatting helpers for text reports

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How money amounts are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountFormat {
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Currency code, omitted when `None`
    pub currency: Option<String>,
    pub currency_before: bool,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            currency: None,
            currency_before: false,
        }
    }
}

/// Insert `separator` between groups of three digits
pub fn group_digits(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let len = digits.chars().count();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Format an amount, e.g. `-1,234.50 GBP`
pub fn format_amount(amount: Decimal, format: &AmountFormat) -> String {
    let rounded =
        amount.round_dp_with_strategy(format.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", format.decimal_places as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut number = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        number.push('-');
    }
    number.push_str(&group_digits(int_part, &format.thousands_separator));
    if let Some(frac) = frac_part {
        number.push_str(&format.decimal_separator);
        number.push_str(frac);
    }

    match &format.currency {
        Some(code) if format.currency_before => format!("{} {}", code, number),
        Some(code) => format!("{} {}", number, code),
        None => number,
    }
}

/// Percentage with two decimals, `-` when undefined
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567", ","), "1,234,567");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("1000", " "), "1 000");
    }

    #[test]
    fn test_format_amount() {
        let format = AmountFormat::default();
        assert_eq!(format_amount(dec!(1234.5), &format), "1,234.50");
        assert_eq!(format_amount(dec!(-98765.125), &format), "-98,765.13");
        assert_eq!(format_amount(dec!(0), &format), "0.00");
        assert_eq!(format_amount(dec!(-0.001), &format), "0.00");
    }

    #[test]
    fn test_format_amount_european_with_currency() {
        let format = AmountFormat {
            decimal_places: 2,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            currency: Some("EUR".to_string()),
            currency_before: true,
        };
        assert_eq!(format_amount(dec!(1500000), &format), "EUR 1.500.000,00");
    }

    #[test]
    fn test_format_amount_no_decimals() {
        let format = AmountFormat {
            decimal_places: 0,
            currency: Some("JPY".to_string()),
            ..AmountFormat::default()
        };
        assert_eq!(format_amount(dec!(12345.6), &format), "12,346 JPY");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(dec!(41.67))), "41.67%");
        assert_eq!(format_percent(Some(dec!(100))), "100.00%");
        assert_eq!(format_percent(None), "-");
    }
}
