//! Record types of a ledger snapshot document
//!
//! These mirror the on-disk layout and keep category and role as free-form
//! strings; `ledgerbook-core` validates and converts them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A complete snapshot handed over by the bookkeeping layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub invoices: Vec<DocumentRecord>,
    #[serde(default)]
    pub bills: Vec<DocumentRecord>,
    #[serde(default)]
    pub tax_codes: Vec<TaxCodeRecord>,
}

/// Chart of accounts entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub number: Option<String>,
    /// e.g. "asset", "Liabilities", "expense"
    pub category: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub archived: bool,
    /// snake_case role name, e.g. "cash", "cost_of_goods_sold"
    #[serde(default)]
    pub role: Option<String>,
}

/// Single signed posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub date: NaiveDate,
    #[serde(deserialize_with = "id_string")]
    pub account_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// Invoice or bill header with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub counterparty: Option<String>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    #[serde(default)]
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub tax_code_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxCodeRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    /// Fraction, e.g. 0.20 for 20%
    pub rate: Decimal,
}

/// Ids and account numbers may be written as bare integers in YAML/JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
