//! Trial balance

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::ledger::Ledger;
use crate::models::{Account, Transaction};
use crate::reports::{TrialBalance, TrialBalanceRow};
use crate::sign;
use crate::types::NormalSide;

pub fn trial_balance(
    accounts: &[Account],
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> CoreResult<TrialBalance> {
    Ok(Ledger::new(accounts.to_vec(), transactions.to_vec())?.trial_balance(as_of))
}

impl Ledger {
    /// Debit/credit listing of every non-archived account with a balance.
    ///
    /// Archived accounts get no row; their raw balance is carried in
    /// `archived_balance` and counted in the balance check. An imbalance
    /// points at broken upstream postings; it is reported in `is_balanced` /
    /// `difference` and never adjusted.
    pub fn trial_balance(&self, as_of: NaiveDate) -> TrialBalance {
        let mut accounts: Vec<&Account> = self.accounts().iter().filter(|a| !a.archived).collect();
        accounts.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut rows = Vec::new();
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;

        for account in accounts {
            let raw = self.index().balance_as_of(&account.id, Some(as_of));
            let Some(side) = sign::side_of(raw) else {
                continue;
            };
            let (debit, credit) = match side {
                NormalSide::Debit => (raw, Decimal::ZERO),
                NormalSide::Credit => (Decimal::ZERO, -raw),
            };
            total_debits += debit;
            total_credits += credit;

            let normal_side = account.category.normal_side();
            rows.push(TrialBalanceRow {
                account_id: account.id.clone(),
                name: account.name.clone(),
                number: account.number.clone(),
                category: account.category,
                normal_side,
                debit,
                credit,
                abnormal: side != normal_side,
            });
        }

        let archived_balance = self.archived_balance(as_of);
        let difference = total_debits - total_credits + archived_balance;
        if !difference.is_zero() {
            log::warn!(
                "Trial balance as of {} is out of balance by {} (debits {}, credits {})",
                as_of,
                difference,
                total_debits,
                total_credits
            );
        }

        TrialBalance {
            as_of,
            rows,
            total_debits,
            total_credits,
            archived_balance,
            is_balanced: difference.is_zero(),
            difference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::fixtures::{self, d};
    use crate::types::Category;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_scenario() {
        let tb = fixtures::simple_ledger().trial_balance(d(2024, 1, 31));
        assert_eq!(tb.rows.len(), 3);

        let cash = &tb.rows[0];
        assert_eq!((cash.account_id.as_str(), cash.debit, cash.credit), ("1", dec!(800), dec!(0)));
        let sales = &tb.rows[1];
        assert_eq!((sales.debit, sales.credit), (dec!(0), dec!(1000)));
        assert!(!sales.abnormal);
        let rent = &tb.rows[2];
        assert_eq!((rent.debit, rent.credit), (dec!(200), dec!(0)));

        assert_eq!(tb.total_debits, dec!(1000));
        assert_eq!(tb.total_credits, dec!(1000));
        assert!(tb.is_balanced);
        assert_eq!(tb.difference, Decimal::ZERO);
    }

    #[test]
    fn test_fixture_balances_and_orders_by_number() {
        let tb = fixtures::ledger().trial_balance(d(2024, 3, 31));
        assert!(tb.is_balanced);
        assert_eq!(tb.total_debits, dec!(22150));

        let numbers: Vec<&str> = tb.rows.iter().filter_map(|r| r.number.as_deref()).collect();
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);

        // group accounts without postings have no row
        assert!(tb.rows.iter().all(|r| r.account_id != "current" && r.account_id != "opex"));
    }

    #[test]
    fn test_contra_asset_flagged_abnormal() {
        let tb = fixtures::ledger().trial_balance(d(2024, 3, 31));
        let accdep = tb.rows.iter().find(|r| r.account_id == "accdep").unwrap();
        assert_eq!(accdep.credit, dec!(150));
        assert_eq!(accdep.normal_side, NormalSide::Debit);
        assert!(accdep.abnormal);
    }

    #[test]
    fn test_as_of_cuts_off_later_postings() {
        let tb = fixtures::ledger().trial_balance(d(2024, 1, 1));
        assert_eq!(tb.rows.len(), 2);
        assert_eq!(tb.total_debits, dec!(10000));
    }

    #[test]
    fn test_unbalanced_ledger_is_surfaced() {
        let accounts = vec![
            Account::new("1", "Cash", Category::Asset),
            Account::new("2", "Sales", Category::Income),
        ];
        let transactions = vec![
            Transaction::new("t1", d(2024, 1, 5), "1", dec!(100)),
            Transaction::new("t2", d(2024, 1, 5), "2", dec!(-90)),
        ];
        let tb = trial_balance(&accounts, &transactions, d(2024, 1, 31)).unwrap();
        assert!(!tb.is_balanced);
        assert_eq!(tb.difference, dec!(10));
    }

    #[test]
    fn test_archived_balance_counted_in_check() {
        let accounts = vec![
            Account::new("bank", "Bank", Category::Asset),
            Account::new("old", "Old bank", Category::Asset).archived(),
            Account::new("cap", "Capital", Category::Equity),
        ];
        let transactions = vec![
            Transaction::new("t1", d(2024, 1, 2), "bank", dec!(500)),
            Transaction::new("t2", d(2024, 1, 2), "old", dec!(100)),
            Transaction::new("t3", d(2024, 1, 2), "cap", dec!(-600)),
        ];
        let tb = trial_balance(&accounts, &transactions, d(2024, 1, 31)).unwrap();
        assert!(tb.rows.iter().all(|r| r.account_id != "old"));
        assert_eq!(tb.archived_balance, dec!(100));
        assert_eq!(tb.total_debits, dec!(500));
        assert_eq!(tb.total_credits, dec!(600));
        assert!(tb.is_balanced);
        assert_eq!(tb.difference, Decimal::ZERO);
    }

    #[test]
    fn test_empty_ledger() {
        let accounts = vec![Account::new("1", "Cash", Category::Asset)];
        let tb = trial_balance(&accounts, &[], d(2024, 1, 31)).unwrap();
        assert!(tb.rows.is_empty());
        assert!(tb.is_balanced);
    }
}
