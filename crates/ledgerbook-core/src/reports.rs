//! Statement result structures

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::DateRange;
use crate::tree::AccountReportNode;
use crate::types::{Category, NormalSide};

// ==================== Trial Balance ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account_id: String,
    pub name: String,
    pub number: Option<String>,
    pub category: Category,
    pub normal_side: NormalSide,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Balance sits on the side opposite to the category's normal side
    pub abnormal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub as_of: NaiveDate,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    /// Raw (debit-positive) balance held by archived accounts, which have no row
    pub archived_balance: Decimal,
    pub is_balanced: bool,
    /// `total_debits - total_credits + archived_balance`
    pub difference: Decimal,
}

// ==================== Balance Sheet ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub assets: Vec<AccountReportNode>,
    pub liabilities: Vec<AccountReportNode>,
    pub equity: Vec<AccountReportNode>,
    /// Cumulative net income not yet closed into an equity account
    pub current_earnings: Decimal,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    /// Equity accounts plus current earnings
    pub total_equity: Decimal,
    /// Raw (debit-positive) balance held by archived accounts of any category
    pub archived_balance: Decimal,
    pub is_balanced: bool,
    /// `total_assets + archived_balance - (total_liabilities + total_equity)`
    pub difference: Decimal,
}

// ==================== Profit & Loss ====================

/// Flattened P&L row for common-size presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossLine {
    pub account_id: String,
    pub name: String,
    pub category: Category,
    pub depth: usize,
    pub amount: Decimal,
    /// Share of total income in percent, `None` when there is no income
    pub percent_of_income: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    pub period: DateRange,
    pub income: Vec<AccountReportNode>,
    pub expenses: Vec<AccountReportNode>,
    pub income_lines: Vec<ProfitLossLine>,
    pub expense_lines: Vec<ProfitLossLine>,
    pub total_income: Decimal,
    pub total_cogs: Decimal,
    pub gross_profit: Decimal,
    /// Expenses other than cost of goods sold
    pub operating_expenses: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub gross_margin_percent: Option<Decimal>,
    pub net_margin_percent: Option<Decimal>,
}

// ==================== Cash Flow ====================

/// Cash effect of one investing or financing account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowLine {
    pub account_id: String,
    pub name: String,
    pub category: Category,
    pub amount: Decimal,
}

/// Indirect-method statement of cash flows.
///
/// Working-capital fields hold cash effects: a rise in receivables is
/// negative, a rise in payables positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementOfCashFlows {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub net_income: Decimal,
    pub depreciation_amortization: Decimal,
    pub receivables_change: Decimal,
    pub inventory_change: Decimal,
    pub prepayments_change: Decimal,
    pub payables_change: Decimal,
    pub cash_from_operations: Decimal,
    pub investing_lines: Vec<CashFlowLine>,
    pub cash_from_investing: Decimal,
    pub financing_lines: Vec<CashFlowLine>,
    pub cash_from_financing: Decimal,
    pub net_change_in_cash: Decimal,
    pub start_cash: Decimal,
    pub end_cash: Decimal,
    pub is_reconciled: bool,
    /// `net_change_in_cash - (end_cash - start_cash)`
    pub reconciliation_difference: Decimal,
}

// ==================== Tax Return ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCodeSummary {
    pub tax_code_id: String,
    pub name: String,
    pub rate: Decimal,
    pub net_sales: Decimal,
    pub output_tax: Decimal,
    pub net_purchases: Decimal,
    pub input_tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxReturn {
    pub period: DateRange,
    pub net_sales: Decimal,
    pub output_tax: Decimal,
    pub net_purchases: Decimal,
    pub input_tax: Decimal,
    /// Positive when tax is owed, negative for a refund
    pub net_vat_payable: Decimal,
    pub by_tax_code: Vec<TaxCodeSummary>,
}
