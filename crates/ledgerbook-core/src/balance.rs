//! Point-in-time balances.
//!
//! [`balance_as_of`] is the plain linear scan. [`BalanceIndex`] holds the
//! same information pre-sorted per account with running totals, so repeated
//! queries cost a binary search instead of a pass over the ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::models::Transaction;
use crate::period::DateRange;

/// Raw sum of postings on `account_ids` dated on or before `as_of`
pub fn balance_as_of<S: AsRef<str>>(
    account_ids: &[S],
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> Decimal {
    let ids: HashSet<&str> = account_ids.iter().map(|s| s.as_ref()).collect();
    transactions
        .iter()
        .filter(|t| t.date <= as_of && ids.contains(t.account_id.as_str()))
        .map(|t| t.amount)
        .sum()
}

/// Date-sorted postings of one account with running totals
#[derive(Debug, Default, Clone)]
struct AccountPostings {
    dates: Vec<NaiveDate>,
    running: Vec<Decimal>,
}

impl AccountPostings {
    fn through(&self, date: NaiveDate) -> Decimal {
        let n = self.dates.partition_point(|d| *d <= date);
        if n == 0 {
            Decimal::ZERO
        } else {
            self.running[n - 1]
        }
    }

    fn total(&self) -> Decimal {
        self.running.last().copied().unwrap_or(Decimal::ZERO)
    }
}

/// Per-account index of raw postings
#[derive(Debug, Default, Clone)]
pub struct BalanceIndex {
    accounts: HashMap<String, AccountPostings>,
}

impl BalanceIndex {
    pub fn new(transactions: &[Transaction]) -> Self {
        let mut grouped: HashMap<&str, Vec<(NaiveDate, Decimal)>> = HashMap::new();
        for t in transactions {
            grouped
                .entry(t.account_id.as_str())
                .or_default()
                .push((t.date, t.amount));
        }

        let accounts = grouped
            .into_iter()
            .map(|(id, mut postings)| {
                postings.sort_by_key(|(date, _)| *date);
                let mut entry = AccountPostings::default();
                let mut running = Decimal::ZERO;
                for (date, amount) in postings {
                    running += amount;
                    entry.dates.push(date);
                    entry.running.push(running);
                }
                (id.to_string(), entry)
            })
            .collect();

        Self { accounts }
    }

    /// Raw balance of one account; `None` means through the last posting
    pub fn balance_as_of(&self, account_id: &str, as_of: Option<NaiveDate>) -> Decimal {
        match (self.accounts.get(account_id), as_of) {
            (None, _) => Decimal::ZERO,
            (Some(p), Some(date)) => p.through(date),
            (Some(p), None) => p.total(),
        }
    }

    /// Raw balance summed over several accounts
    pub fn total_as_of<'a, I>(&self, account_ids: I, as_of: Option<NaiveDate>) -> Decimal
    where
        I: IntoIterator<Item = &'a str>,
    {
        account_ids
            .into_iter()
            .map(|id| self.balance_as_of(id, as_of))
            .sum()
    }

    /// Raw sum of one account's postings inside `range`
    pub fn movement(&self, account_id: &str, range: &DateRange) -> Decimal {
        let Some(postings) = self.accounts.get(account_id) else {
            return Decimal::ZERO;
        };
        let closing = match range.end {
            Some(end) => postings.through(end),
            None => postings.total(),
        };
        let opening = match range.start {
            Some(start) => start
                .pred_opt()
                .map(|before| postings.through(before))
                .unwrap_or(Decimal::ZERO),
            None => Decimal::ZERO,
        };
        closing - opening
    }

    /// Number of accounts that have at least one posting
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
