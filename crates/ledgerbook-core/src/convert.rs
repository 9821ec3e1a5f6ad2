//! Snapshot document to validated books

use ledgerbook_config::ReportingConfig;
use ledgerbook_snapshot::{AccountRecord, DocumentRecord, LedgerDocument};
use serde::{Deserialize, Serialize};

use crate::classify::{infer_role, RoleInference};
use crate::error::{CoreError, CoreResult};
use crate::ledger::Ledger;
use crate::models::{Account, LineItem, TaxCode, TaxDocument, Transaction};
use crate::period::DateRange;
use crate::reports::TaxReturn;
use crate::statements::tax_return;
use crate::types::{AccountRole, Category};

/// Role picked for an account that had none in the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredRole {
    pub account_id: String,
    pub name: String,
    pub category: Category,
    pub inference: RoleInference,
}

/// Everything the statement derivers need, converted and validated once
#[derive(Debug, Clone)]
pub struct Books {
    ledger: Ledger,
    invoices: Vec<TaxDocument>,
    bills: Vec<TaxDocument>,
    tax_codes: Vec<TaxCode>,
    inferred_roles: Vec<InferredRole>,
}

impl Books {
    pub fn from_document(document: LedgerDocument, reporting: &ReportingConfig) -> CoreResult<Self> {
        let mut inferred_roles = Vec::new();
        let accounts = document
            .accounts
            .into_iter()
            .map(|record| convert_account(record, reporting.infer_roles, &mut inferred_roles))
            .collect::<CoreResult<Vec<_>>>()?;

        let transactions = document
            .transactions
            .into_iter()
            .map(|t| Transaction {
                id: t.id,
                date: t.date,
                account_id: t.account_id,
                amount: t.amount,
                description: t.description,
            })
            .collect();

        let tax_codes = document
            .tax_codes
            .into_iter()
            .map(|c| TaxCode {
                id: c.id,
                name: c.name,
                rate: c.rate,
            })
            .collect();

        let ambiguous = inferred_roles.iter().filter(|r| r.inference.is_ambiguous()).count();
        if ambiguous > 0 {
            log::warn!("{} account(s) could not be classified unambiguously", ambiguous);
        }
        // unclassified balance sheet accounts land in investing or financing
        for r in inferred_roles.iter().filter(|r| {
            r.inference == RoleInference::Unmatched
                && matches!(r.category, Category::Asset | Category::Liability)
        }) {
            log::warn!(
                "Account {} '{}' ({}) matched no role and is treated as 'other'",
                r.account_id,
                r.name,
                r.category
            );
        }

        Ok(Self {
            ledger: Ledger::new(accounts, transactions)?,
            invoices: document.invoices.into_iter().map(convert_document).collect(),
            bills: document.bills.into_iter().map(convert_document).collect(),
            tax_codes,
            inferred_roles,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn invoices(&self) -> &[TaxDocument] {
        &self.invoices
    }

    pub fn bills(&self) -> &[TaxDocument] {
        &self.bills
    }

    pub fn tax_codes(&self) -> &[TaxCode] {
        &self.tax_codes
    }

    /// Every account that went through name inference, matched or not
    pub fn inferred_roles(&self) -> &[InferredRole] {
        &self.inferred_roles
    }

    pub fn tax_return(&self, range: &DateRange) -> CoreResult<TaxReturn> {
        tax_return(&self.invoices, &self.bills, &self.tax_codes, range)
    }
}

fn convert_account(
    record: AccountRecord,
    infer: bool,
    inferred: &mut Vec<InferredRole>,
) -> CoreResult<Account> {
    let category: Category = record
        .category
        .parse()
        .map_err(|_| CoreError::InvalidCategory {
            account_id: record.id.clone(),
            value: record.category.clone(),
        })?;

    let role = match record.role.as_deref() {
        Some(value) => value.parse().map_err(|_| CoreError::InvalidRole {
            account_id: record.id.clone(),
            value: value.to_string(),
        })?,
        None if infer => {
            let inference = infer_role(&record.name, category);
            let role = inference.role();
            inferred.push(InferredRole {
                account_id: record.id.clone(),
                name: record.name.clone(),
                category,
                inference,
            });
            role
        }
        None => AccountRole::Other,
    };

    Ok(Account {
        id: record.id,
        name: record.name,
        number: record.number.filter(|n| !n.is_empty()),
        category,
        parent_id: record.parent_id,
        archived: record.archived,
        role,
    })
}

fn convert_document(record: DocumentRecord) -> TaxDocument {
    TaxDocument {
        id: record.id,
        date: record.date,
        counterparty: record.counterparty,
        lines: record
            .lines
            .into_iter()
            .map(|l| LineItem {
                description: l.description,
                quantity: l.quantity,
                unit_price: l.unit_price,
                tax_code_id: l.tax_code_id,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerbook_snapshot::{parse_document, SnapshotFormat};
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"
accounts:
  - { id: 1, name: Bank, number: "1010", category: Assets }
  - { id: 2, name: Inventory Receivable, category: asset }
  - { id: 3, name: Sales, number: "4000", category: income }
  - { id: 4, name: Cost of goods sold, category: expenses, role: cost_of_goods_sold }
transactions:
  - { id: t1, date: 2024-01-05, account_id: 1, amount: 1000 }
  - { id: t2, date: 2024-01-05, account_id: 3, amount: -1000 }
invoices:
  - id: INV-1
    date: 2024-01-05
    lines:
      - { description: Widgets, quantity: 10, unit_price: 100, tax_code_id: STD }
tax_codes:
  - { id: STD, name: Standard, rate: 0.2 }
"#;

    fn document(text: &str) -> LedgerDocument {
        parse_document(text, SnapshotFormat::Yaml, "test").unwrap()
    }

    fn reporting(infer_roles: bool) -> ReportingConfig {
        ReportingConfig {
            infer_roles,
            ..ReportingConfig::default()
        }
    }

    #[test]
    fn test_explicit_roles_without_inference() {
        let books = Books::from_document(document(SNAPSHOT), &reporting(false)).unwrap();
        let ledger = books.ledger();
        assert_eq!(ledger.account("1").unwrap().role, AccountRole::Other);
        assert_eq!(ledger.account("4").unwrap().role, AccountRole::CostOfGoodsSold);
        assert_eq!(ledger.account("2").unwrap().category, Category::Asset);
        assert!(books.inferred_roles().is_empty());
    }

    #[test]
    fn test_inference_reports_ambiguity() {
        let books = Books::from_document(document(SNAPSHOT), &reporting(true)).unwrap();
        let ledger = books.ledger();
        assert_eq!(ledger.account("1").unwrap().role, AccountRole::Cash);
        assert_eq!(ledger.account("2").unwrap().role, AccountRole::Other);

        let ambiguous: Vec<&str> = books
            .inferred_roles()
            .iter()
            .filter(|r| r.inference.is_ambiguous())
            .map(|r| r.account_id.as_str())
            .collect();
        assert_eq!(ambiguous, vec!["2"]);
        // explicit roles are never re-inferred
        assert!(books.inferred_roles().iter().all(|r| r.account_id != "4"));
    }

    #[test]
    fn test_inference_records_unmatched_accounts() {
        let doc = document(
            "accounts:\n  - { id: a, name: Bank, category: asset }\n  \
             - { id: b, name: Vehicles, category: asset }\n  \
             - { id: c, name: Director loan, category: liability }\n",
        );
        let books = Books::from_document(doc, &reporting(true)).unwrap();
        let unmatched: Vec<(&str, Category)> = books
            .inferred_roles()
            .iter()
            .filter(|r| r.inference == RoleInference::Unmatched)
            .map(|r| (r.account_id.as_str(), r.category))
            .collect();
        assert_eq!(unmatched, vec![("b", Category::Asset), ("c", Category::Liability)]);
        assert_eq!(books.ledger().account("b").unwrap().role, AccountRole::Other);
        assert_eq!(books.inferred_roles().len(), 3);
    }

    #[test]
    fn test_tax_return_from_documents() {
        let books = Books::from_document(document(SNAPSHOT), &reporting(false)).unwrap();
        let jan = DateRange::between(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        let vat = books.tax_return(&jan).unwrap();
        assert_eq!(vat.net_sales, dec!(1000));
        assert_eq!(vat.output_tax, dec!(200));
        assert_eq!(vat.net_vat_payable, dec!(200));
    }

    #[test]
    fn test_invalid_category() {
        let doc = document("accounts:\n  - { id: a, name: Misc, category: assetz }\n");
        let err = Books::from_document(doc, &reporting(false)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidCategory {
                account_id: "a".to_string(),
                value: "assetz".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_and_mismatched_roles() {
        let doc = document("accounts:\n  - { id: a, name: Misc, category: asset, role: treasure }\n");
        assert!(matches!(
            Books::from_document(doc, &reporting(false)),
            Err(CoreError::InvalidRole { .. })
        ));

        let doc = document("accounts:\n  - { id: a, name: Rent, category: expense, role: cash }\n");
        assert!(matches!(
            Books::from_document(doc, &reporting(false)),
            Err(CoreError::RoleMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_account_reference() {
        let doc = document(
            "accounts:\n  - { id: a, name: Bank, category: asset }\n\
             transactions:\n  - { id: t1, date: 2024-01-01, account_id: b, amount: 5 }\n",
        );
        assert!(matches!(
            Books::from_document(doc, &reporting(false)),
            Err(CoreError::UnknownAccount { .. })
        ));
    }
}
