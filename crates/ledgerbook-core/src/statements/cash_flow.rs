//! Statement of cash flows, indirect method.
//!
//! Operating cash starts from net income, adds back the non-cash
//! depreciation charge and corrects for working-capital movements. Accounts
//! are bucketed by role and category only:
//!
//! * operating: income, expenses, receivable / inventory / prepayment /
//!   payable accounts
//! * investing: other asset accounts
//! * financing: equity accounts and non-payable liabilities
//! * cash: the reconciliation target
//!
//! Accumulated depreciation is in none of the buckets; its movement is the
//! depreciation add-back.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::CoreResult;
use crate::ledger::Ledger;
use crate::models::{Account, Transaction};
use crate::period::DateRange;
use crate::reports::{CashFlowLine, StatementOfCashFlows};
use crate::sign;
use crate::types::{AccountRole, Category};

pub fn cash_flow_statement(
    transactions: &[Transaction],
    accounts: &[Account],
    start: NaiveDate,
    end: NaiveDate,
) -> CoreResult<StatementOfCashFlows> {
    Ledger::new(accounts.to_vec(), transactions.to_vec())?.cash_flow(start, end)
}

/// Where an account's movement lands in the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Cash,
    Profit,
    WorkingCapital(AccountRole),
    Investing,
    Financing,
    Excluded,
}

fn bucket_of(account: &Account) -> Bucket {
    match (account.category, account.role) {
        (_, AccountRole::Cash) => Bucket::Cash,
        (Category::Income | Category::Expense, _) => Bucket::Profit,
        (
            _,
            role @ (AccountRole::Receivable
            | AccountRole::Inventory
            | AccountRole::Prepayment
            | AccountRole::Payable),
        ) => Bucket::WorkingCapital(role),
        (_, AccountRole::AccumulatedDepreciation) => Bucket::Excluded,
        (Category::Asset, _) => Bucket::Investing,
        (Category::Liability | Category::Equity, _) => Bucket::Financing,
    }
}

impl Ledger {
    /// Cash flows for `start..=end`.
    ///
    /// Every account takes part, archived ones included, so that each
    /// posting lands in exactly one bucket. The result is always returned;
    /// a reconciliation gap is reported through `is_reconciled`.
    pub fn cash_flow(&self, start: NaiveDate, end: NaiveDate) -> CoreResult<StatementOfCashFlows> {
        let range = DateRange::between(start, end)?;
        let opening_day = range.day_before_start();

        let opening = |id: &str| -> Decimal {
            opening_day
                .map(|day| self.index().balance_as_of(id, Some(day)))
                .unwrap_or(Decimal::ZERO)
        };
        let closing = |id: &str| -> Decimal { self.index().balance_as_of(id, Some(end)) };
        // normalized period movement from the two boundary balances
        let delta = |account: &Account| -> Decimal {
            sign::normalize(account.category, closing(&account.id) - opening(&account.id))
        };

        let mut accounts: Vec<&Account> = self.accounts().iter().collect();
        accounts.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        let mut depreciation_amortization = Decimal::ZERO;
        let mut receivables_change = Decimal::ZERO;
        let mut inventory_change = Decimal::ZERO;
        let mut prepayments_change = Decimal::ZERO;
        let mut payables_change = Decimal::ZERO;
        let mut investing_lines = Vec::new();
        let mut financing_lines = Vec::new();
        let mut start_cash = Decimal::ZERO;
        let mut end_cash = Decimal::ZERO;

        for account in accounts {
            match bucket_of(account) {
                Bucket::Cash => {
                    start_cash += opening(&account.id);
                    end_cash += closing(&account.id);
                }
                Bucket::Profit => {
                    let amount = delta(account);
                    if account.category == Category::Income {
                        income += amount;
                    } else {
                        expenses += amount;
                        if account.role == AccountRole::DepreciationAmortization {
                            depreciation_amortization += amount;
                        }
                    }
                }
                Bucket::WorkingCapital(role) => {
                    let change = delta(account);
                    match role {
                        AccountRole::Receivable => receivables_change -= change,
                        AccountRole::Inventory => inventory_change -= change,
                        AccountRole::Prepayment => prepayments_change -= change,
                        _ => payables_change += change,
                    }
                }
                Bucket::Investing => {
                    let amount = -delta(account);
                    if !amount.is_zero() {
                        investing_lines.push(line(account, amount));
                    }
                }
                Bucket::Financing => {
                    let amount = delta(account);
                    if !amount.is_zero() {
                        financing_lines.push(line(account, amount));
                    }
                }
                Bucket::Excluded => {}
            }
        }

        let net_income = income - expenses;
        let cash_from_operations = net_income
            + depreciation_amortization
            + receivables_change
            + inventory_change
            + prepayments_change
            + payables_change;
        let cash_from_investing: Decimal = investing_lines.iter().map(|l| l.amount).sum();
        let cash_from_financing: Decimal = financing_lines.iter().map(|l| l.amount).sum();
        let net_change_in_cash = cash_from_operations + cash_from_investing + cash_from_financing;

        let reconciliation_difference = net_change_in_cash - (end_cash - start_cash);
        if !reconciliation_difference.is_zero() {
            log::warn!(
                "Cash flow for {} does not reconcile: derived change {} vs cash movement {} \
                 (check account roles and out-of-period postings)",
                range.description(),
                net_change_in_cash,
                end_cash - start_cash
            );
        }

        Ok(StatementOfCashFlows {
            start,
            end,
            net_income,
            depreciation_amortization,
            receivables_change,
            inventory_change,
            prepayments_change,
            payables_change,
            cash_from_operations,
            investing_lines,
            cash_from_investing,
            financing_lines,
            cash_from_financing,
            net_change_in_cash,
            start_cash,
            end_cash,
            is_reconciled: reconciliation_difference.is_zero(),
            reconciliation_difference,
        })
    }
}

fn line(account: &Account, amount: Decimal) -> CashFlowLine {
    CashFlowLine {
        account_id: account.id.clone(),
        name: account.name.clone(),
        category: account.category,
        amount,
    }
}
