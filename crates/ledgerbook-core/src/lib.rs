//! Ledger aggregation and financial statement derivation
//!
//! A [`Ledger`] is built once from accounts and postings and then answers
//! any number of read-only statement requests: account trees, trial
//! balance, balance sheet, profit and loss and the indirect cash flow
//! statement. [`Books`] adds the invoices and bills needed for a tax return.

pub mod balance;
pub mod classify;
pub mod convert;
pub mod error;
pub mod ledger;
pub mod models;
pub mod period;
pub mod reports;
pub mod sign;
pub mod statements;
pub mod tree;
pub mod types;

pub use balance::{balance_as_of, BalanceIndex};
pub use classify::{infer_role, RoleInference};
pub use convert::{Books, InferredRole};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use ledger::Ledger;
pub use models::{Account, LineItem, TaxCode, TaxDocument, Transaction};
pub use period::DateRange;
pub use reports::{
    BalanceSheet, CashFlowLine, ProfitAndLoss, ProfitLossLine, StatementOfCashFlows,
    TaxCodeSummary, TaxReturn, TrialBalance, TrialBalanceRow,
};
pub use statements::profit_loss::percent_of;
pub use statements::{balance_sheet, cash_flow_statement, profit_and_loss, tax_return, trial_balance};
pub use tree::{build_account_tree, AccountReportNode};
pub use types::{AccountRole, Category, NormalSide};
