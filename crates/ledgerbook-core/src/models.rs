//! Core data models for the ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{AccountRole, Category};

/// Chart of accounts entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Stable unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Account number used for ordering, may be empty
    #[serde(default)]
    pub number: Option<String>,
    pub category: Category,
    /// Parent account; a missing parent makes this account a root
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Archived accounts keep their history but are left out of reports
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub role: AccountRole,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: None,
            category,
            parent_id: None,
            archived: false,
            role: AccountRole::Other,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = role;
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Sort key: account number (missing sorts as empty), then id
    pub fn sort_key(&self) -> (&str, &str) {
        (self.number.as_deref().unwrap_or(""), self.id.as_str())
    }
}

/// Single signed posting against one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub account_id: String,
    /// Debit-positive amount
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        account_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            account_id: account_id.into(),
            amount,
            description: None,
        }
    }
}

/// VAT/sales tax code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCode {
    pub id: String,
    pub name: String,
    /// Fraction of the net line total, e.g. 0.20
    pub rate: Decimal,
}

/// Invoice or bill line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub tax_code_id: Option<String>,
}

impl LineItem {
    pub fn new(quantity: Decimal, unit_price: Decimal, tax_code_id: Option<&str>) -> Self {
        Self {
            description: String::new(),
            quantity,
            unit_price,
            tax_code_id: tax_code_id.map(str::to_string),
        }
    }

    /// Net amount before tax
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Sales invoice (output tax) or purchase bill (input tax)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDocument {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub counterparty: Option<String>,
    pub lines: Vec<LineItem>,
}

impl TaxDocument {
    pub fn new(id: impl Into<String>, date: NaiveDate, lines: Vec<LineItem>) -> Self {
        Self {
            id: id.into(),
            date,
            counterparty: None,
            lines,
        }
    }
}
