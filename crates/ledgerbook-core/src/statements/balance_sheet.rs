//! Balance sheet

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::ledger::Ledger;
use crate::models::{Account, Transaction};
use crate::period::DateRange;
use crate::reports::BalanceSheet;
use crate::sign;
use crate::tree::sum_roots;
use crate::types::Category;

pub fn balance_sheet(
    accounts: &[Account],
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> CoreResult<BalanceSheet> {
    Ledger::new(accounts.to_vec(), transactions.to_vec())?.balance_sheet(as_of)
}

impl Ledger {
    /// Cumulative position since inception through `as_of`.
    ///
    /// Archived accounts stay out of the trees; their combined raw balance
    /// is reported as `archived_balance` and included in the balance check.
    pub fn balance_sheet(&self, as_of: NaiveDate) -> CoreResult<BalanceSheet> {
        let range = DateRange::through(as_of);
        let assets = self.account_tree(&[Category::Asset], &range)?;
        let liabilities = self.account_tree(&[Category::Liability], &range)?;
        let equity = self.account_tree(&[Category::Equity], &range)?;

        let current_earnings = self.net_income(&range);

        let total_assets = sum_roots(&assets);
        let total_liabilities = sum_roots(&liabilities);
        let total_equity = sum_roots(&equity) + current_earnings;
        let archived_balance = self.archived_balance(as_of);
        let difference = total_assets + archived_balance - (total_liabilities + total_equity);

        if !difference.is_zero() {
            log::warn!(
                "Balance sheet as of {} does not balance: assets {} (archived {}) vs liabilities + equity {}",
                as_of,
                total_assets,
                archived_balance,
                total_liabilities + total_equity
            );
        }

        Ok(BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            current_earnings,
            total_assets,
            total_liabilities,
            total_equity,
            archived_balance,
            is_balanced: difference.is_zero(),
            difference,
        })
    }

    /// Normalized income minus normalized expenses of non-archived accounts
    pub(crate) fn net_income(&self, range: &DateRange) -> Decimal {
        let reported = |category: Category| -> Decimal {
            self.active_accounts(category)
                .map(|a| sign::normalize(category, self.index().movement(&a.id, range)))
                .sum()
        };
        reported(Category::Income) - reported(Category::Expense)
    }
}
