//! Account tree builder.
//!
//! Nodes are first laid out in an arena keyed by account id, linked by
//! index, and totalled in a single leaves-first pass before being turned
//! into the nested [`AccountReportNode`] shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::ledger::Ledger;
use crate::models::{Account, Transaction};
use crate::period::DateRange;
use crate::sign;
use crate::types::{AccountRole, Category};

/// One account in a report tree with its rolled-up total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountReportNode {
    pub id: String,
    pub name: String,
    pub number: Option<String>,
    pub category: Category,
    pub role: AccountRole,
    /// Report-normalized postings on this account alone
    pub own_total: Decimal,
    /// Raw sum of this account and all descendants, normalized by this
    /// account's category
    pub total: Decimal,
    /// 0 for roots
    pub depth: usize,
    pub children: Vec<AccountReportNode>,
}

impl AccountReportNode {
    /// This node and its descendants in display order
    pub fn flatten(&self) -> Vec<&AccountReportNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn find(&self, id: &str) -> Option<&AccountReportNode> {
        self.flatten().into_iter().find(|n| n.id == id)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Sum of root totals
pub fn sum_roots(roots: &[AccountReportNode]) -> Decimal {
    roots.iter().map(|n| n.total).sum()
}

/// All nodes of a forest in display order
pub fn flatten_forest(roots: &[AccountReportNode]) -> Vec<&AccountReportNode> {
    roots.iter().flat_map(|r| r.flatten()).collect()
}

/// Build the tree for `categories` from raw accounts and transactions.
///
/// Validates the inputs first; use [`Ledger::account_tree`] when building
/// several trees from the same snapshot.
pub fn build_account_tree(
    accounts: &[Account],
    transactions: &[Transaction],
    categories: &[Category],
    range: &DateRange,
) -> CoreResult<Vec<AccountReportNode>> {
    let ledger = Ledger::new(accounts.to_vec(), transactions.to_vec())?;
    ledger.account_tree(categories, range)
}

impl Ledger {
    /// Hierarchical totals of non-archived accounts in `categories`.
    ///
    /// Accounts without postings in `range` are kept with a zero total. An
    /// account whose parent is archived, of another category, or missing
    /// becomes a root. Siblings are ordered by account number, then id.
    pub fn account_tree(
        &self,
        categories: &[Category],
        range: &DateRange,
    ) -> CoreResult<Vec<AccountReportNode>> {
        if categories.is_empty() {
            return Err(CoreError::ValidationError {
                message: "account tree requires at least one category".to_string(),
            });
        }

        let mut selected: Vec<&Account> = self
            .accounts()
            .iter()
            .filter(|a| !a.archived && categories.contains(&a.category))
            .collect();
        selected.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let slot_of: HashMap<&str, usize> = selected
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.as_str(), i))
            .collect();

        let mut parent: Vec<Option<usize>> = vec![None; selected.len()];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); selected.len()];
        let mut roots = Vec::new();
        for (i, account) in selected.iter().enumerate() {
            match account
                .parent_id
                .as_deref()
                .and_then(|p| slot_of.get(p))
            {
                Some(&p) => {
                    parent[i] = Some(p);
                    children[p].push(i);
                }
                None => roots.push(i),
            }
        }

        let own: Vec<Decimal> = selected
            .iter()
            .map(|a| self.index().movement(&a.id, range))
            .collect();

        // preorder with depths; reversed, it visits every child before its parent
        let mut order = Vec::with_capacity(selected.len());
        let mut depth = vec![0usize; selected.len()];
        let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            order.push(i);
            for &c in children[i].iter().rev() {
                depth[c] = depth[i] + 1;
                stack.push(c);
            }
        }

        // raw sums roll up first; the sign rule applies to each subtree total
        let mut totals = own.clone();
        for &i in order.iter().rev() {
            if let Some(p) = parent[i] {
                let child = totals[i];
                totals[p] += child;
            }
        }

        let mut slots: Vec<Option<AccountReportNode>> = vec![None; selected.len()];
        for &i in order.iter().rev() {
            let account = selected[i];
            let kids = children[i]
                .iter()
                .filter_map(|&c| slots[c].take())
                .collect();
            slots[i] = Some(AccountReportNode {
                id: account.id.clone(),
                name: account.name.clone(),
                number: account.number.clone(),
                category: account.category,
                role: account.role,
                own_total: sign::normalize(account.category, own[i]),
                total: sign::normalize(account.category, totals[i]),
                depth: depth[i],
                children: kids,
            });
        }

        let forest: Vec<AccountReportNode> =
            roots.iter().filter_map(|&r| slots[r].take()).collect();

        log::debug!(
            "Built account tree for {:?} over {}: {} accounts, {} roots",
            categories,
            range.description(),
            selected.len(),
            forest.len()
        );

        Ok(forest)
    }
}
