//! Validated, immutable ledger snapshot

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::balance::BalanceIndex;
use crate::error::{CoreError, CoreResult};
use crate::models::{Account, Transaction};
use crate::types::Category;

/// Chart of accounts plus postings, checked for referential integrity.
///
/// Every derivation borrows a `Ledger` immutably, so one snapshot can serve
/// concurrent report requests.
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: Vec<Account>,
    by_id: HashMap<String, usize>,
    transactions: Vec<Transaction>,
    index: BalanceIndex,
}

impl Ledger {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>) -> CoreResult<Self> {
        let mut by_id = HashMap::with_capacity(accounts.len());
        for (i, account) in accounts.iter().enumerate() {
            if by_id.insert(account.id.clone(), i).is_some() {
                return Err(CoreError::DuplicateAccount {
                    id: account.id.clone(),
                });
            }
            if !account.role.is_compatible_with(account.category) {
                return Err(CoreError::RoleMismatch {
                    account_id: account.id.clone(),
                    role: account.role,
                    category: account.category,
                });
            }
        }

        check_acyclic(&accounts, &by_id)?;

        let mut seen = HashSet::with_capacity(transactions.len());
        for t in &transactions {
            if !seen.insert(t.id.as_str()) {
                return Err(CoreError::DuplicateTransaction { id: t.id.clone() });
            }
            if !by_id.contains_key(&t.account_id) {
                return Err(CoreError::UnknownAccount {
                    transaction_id: t.id.clone(),
                    account_id: t.account_id.clone(),
                });
            }
        }

        let index = BalanceIndex::new(&transactions);
        log::debug!(
            "Ledger snapshot ready: {} accounts, {} transactions, {} accounts with postings",
            accounts.len(),
            transactions.len(),
            index.account_count()
        );

        Ok(Self {
            accounts,
            by_id,
            transactions,
            index,
        })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.by_id.get(id).map(|&i| &self.accounts[i])
    }

    pub fn index(&self) -> &BalanceIndex {
        &self.index
    }

    /// Non-archived accounts of one category
    pub fn active_accounts(&self, category: Category) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |a| a.category == category && !a.archived)
    }

    /// Raw balance of all archived accounts through `as_of`
    pub fn archived_balance(&self, as_of: NaiveDate) -> Decimal {
        self.index.total_as_of(
            self.accounts
                .iter()
                .filter(|a| a.archived)
                .map(|a| a.id.as_str()),
            Some(as_of),
        )
    }

    /// Raw balance of the given accounts through `as_of`, using the index
    pub fn balance_as_of<S: AsRef<str>>(&self, account_ids: &[S], as_of: NaiveDate) -> Decimal {
        self.index
            .total_as_of(account_ids.iter().map(|s| s.as_ref()), Some(as_of))
    }
}

/// Reject parent chains that loop back on themselves.
///
/// Parent ids that match no account end the chain without error.
fn check_acyclic(accounts: &[Account], by_id: &HashMap<String, usize>) -> CoreResult<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; accounts.len()];
    let mut path = Vec::new();

    for start in 0..accounts.len() {
        let mut current = Some(start);
        while let Some(i) = current {
            match marks[i] {
                Mark::Done => break,
                Mark::OnPath => {
                    return Err(CoreError::CyclicHierarchy {
                        account_id: accounts[i].id.clone(),
                    })
                }
                Mark::Unvisited => {
                    marks[i] = Mark::OnPath;
                    path.push(i);
                    current = accounts[i]
                        .parent_id
                        .as_ref()
                        .and_then(|p| by_id.get(p))
                        .copied();
                }
            }
        }
        for i in path.drain(..) {
            marks[i] = Mark::Done;
        }
    }
    Ok(())
}
