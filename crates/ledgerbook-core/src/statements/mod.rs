//! Statement derivers built on the account tree and balance index

pub mod balance_sheet;
pub mod cash_flow;
pub mod profit_loss;
pub mod tax;
pub mod trial_balance;

pub use balance_sheet::balance_sheet;
pub use cash_flow::cash_flow_statement;
pub use profit_loss::profit_and_loss;
pub use tax::tax_return;
pub use trial_balance::trial_balance;

#[cfg(test)]
pub(crate) mod fixtures;
