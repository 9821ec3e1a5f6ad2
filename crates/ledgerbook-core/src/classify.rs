//! Name-based role inference for snapshots that predate explicit roles.
//!
//! Only roles compatible with the account's category are tried. A name that
//! matches several roles is never resolved by precedence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{AccountRole, Category};

static RULES: Lazy<Vec<(AccountRole, Regex)>> = Lazy::new(|| {
    [
        (AccountRole::Cash, r"(?i)\b(cash|bank|checking)\b"),
        (AccountRole::Receivable, r"(?i)\b(receivables?|debtors?)\b"),
        (AccountRole::Inventory, r"(?i)\b(inventory|inventories|stock)\b"),
        (AccountRole::Prepayment, r"(?i)\b(prepaid|prepayments?)\b"),
        (
            AccountRole::AccumulatedDepreciation,
            r"(?i)\baccumulated\s+(depreciation|amorti[sz]ation)\b",
        ),
        (AccountRole::Payable, r"(?i)\b(payables?|creditors?)\b"),
        (
            AccountRole::CostOfGoodsSold,
            r"(?i)\b(cost\s+of\s+(goods\s+sold|sales)|cogs)\b",
        ),
        (
            AccountRole::DepreciationAmortization,
            r"(?i)\b(depreciation|amorti[sz]ation)\b",
        ),
    ]
    .into_iter()
    .map(|(role, pattern)| (role, Regex::new(pattern).expect("role pattern")))
    .collect()
});

/// Outcome of inferring a role from an account name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "roles", rename_all = "snake_case")]
pub enum RoleInference {
    Matched(AccountRole),
    Unmatched,
    /// Several roles matched; the account keeps `Other`
    Ambiguous(Vec<AccountRole>),
}

impl RoleInference {
    /// Role to assign
    pub fn role(&self) -> AccountRole {
        match self {
            RoleInference::Matched(role) => *role,
            RoleInference::Unmatched | RoleInference::Ambiguous(_) => AccountRole::Other,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, RoleInference::Ambiguous(_))
    }
}

pub fn infer_role(name: &str, category: Category) -> RoleInference {
    let matches: Vec<AccountRole> = RULES
        .iter()
        .filter(|(role, _)| role.required_category() == Some(category))
        .filter(|(_, pattern)| pattern.is_match(name))
        .map(|(role, _)| *role)
        .collect();

    match matches.as_slice() {
        [] => {
            log::debug!("Account name '{}' ({}) matches no role pattern", name, category);
            RoleInference::Unmatched
        }
        [role] => RoleInference::Matched(*role),
        _ => {
            log::warn!(
                "Account name '{}' matches several roles ({}); leaving it as 'other'",
                name,
                matches
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            RoleInference::Ambiguous(matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_matches() {
        assert_eq!(
            infer_role("Business Bank Account", Category::Asset),
            RoleInference::Matched(AccountRole::Cash)
        );
        assert_eq!(
            infer_role("Trade debtors", Category::Asset),
            RoleInference::Matched(AccountRole::Receivable)
        );
        assert_eq!(
            infer_role("Prepaid insurance", Category::Asset),
            RoleInference::Matched(AccountRole::Prepayment)
        );
        assert_eq!(
            infer_role("Accounts Payable", Category::Liability),
            RoleInference::Matched(AccountRole::Payable)
        );
        assert_eq!(
            infer_role("COGS", Category::Expense),
            RoleInference::Matched(AccountRole::CostOfGoodsSold)
        );
        assert_eq!(
            infer_role("Amortisation of software", Category::Expense),
            RoleInference::Matched(AccountRole::DepreciationAmortization)
        );
    }

    #[test]
    fn test_category_restricts_candidates() {
        // expense-only role never lands on the contra asset
        assert_eq!(
            infer_role("Accumulated depreciation", Category::Asset),
            RoleInference::Matched(AccountRole::AccumulatedDepreciation)
        );
        assert_eq!(infer_role("Bank loan", Category::Liability), RoleInference::Unmatched);
        assert_eq!(infer_role("Cash sales", Category::Income), RoleInference::Unmatched);
    }

    #[test]
    fn test_ambiguous_name() {
        let inference = infer_role("Inventory Receivable", Category::Asset);
        assert!(inference.is_ambiguous());
        assert_eq!(
            inference,
            RoleInference::Ambiguous(vec![AccountRole::Receivable, AccountRole::Inventory])
        );
        assert_eq!(inference.role(), AccountRole::Other);
    }

    #[test]
    fn test_no_partial_word_match() {
        assert_eq!(infer_role("Cashmere stock-take fees", Category::Expense), RoleInference::Unmatched);
        assert_eq!(infer_role("Bankruptcy reserve", Category::Asset), RoleInference::Unmatched);
    }
}
