//! Sign convention shared by every statement.
//!
//! Postings are stored debit-positive: a debit is a positive amount, a
//! credit a negative one, and a balanced ledger sums to zero. Reports show
//! each category on its normal side, so credit-normal categories are negated.
//!
//! | Category  | Normal side | Reported as |
//! |-----------|-------------|-------------|
//! | Asset     | Debit       | raw         |
//! | Expense   | Debit       | raw         |
//! | Liability | Credit      | -raw        |
//! | Equity    | Credit      | -raw        |
//! | Income    | Credit      | -raw        |
//!
//! No other module negates amounts for presentation.

use rust_decimal::Decimal;

use crate::types::{Category, NormalSide};

/// Multiplier turning a raw amount into its reported value
pub fn report_sign(category: Category) -> Decimal {
    match category.normal_side() {
        NormalSide::Debit => Decimal::ONE,
        NormalSide::Credit => Decimal::NEGATIVE_ONE,
    }
}

/// Raw stored amount to report-normalized amount
pub fn normalize(category: Category, raw: Decimal) -> Decimal {
    raw * report_sign(category)
}

/// Report-normalized amount back to the raw stored amount
pub fn to_raw(category: Category, reported: Decimal) -> Decimal {
    reported * report_sign(category)
}

/// Side a raw balance sits on, `None` for zero
pub fn side_of(raw: Decimal) -> Option<NormalSide> {
    if raw > Decimal::ZERO {
        Some(NormalSide::Debit)
    } else if raw < Decimal::ZERO {
        Some(NormalSide::Credit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_normal_unchanged() {
        assert_eq!(normalize(Category::Asset, dec!(800)), dec!(800));
        assert_eq!(normalize(Category::Expense, dec!(200)), dec!(200));
    }

    #[test]
    fn test_credit_normal_inverted() {
        assert_eq!(normalize(Category::Income, dec!(-1000)), dec!(1000));
        assert_eq!(normalize(Category::Liability, dec!(-50.25)), dec!(50.25));
        assert_eq!(normalize(Category::Equity, dec!(10)), dec!(-10));
    }

    #[test]
    fn test_to_raw_inverts_normalize() {
        for category in Category::ALL {
            let raw = dec!(-123.45);
            assert_eq!(to_raw(category, normalize(category, raw)), raw);
        }
    }

    #[test]
    fn test_side_of() {
        assert_eq!(side_of(dec!(0.01)), Some(NormalSide::Debit));
        assert_eq!(side_of(dec!(-0.01)), Some(NormalSide::Credit));
        assert_eq!(side_of(Decimal::ZERO), None);
    }
}
