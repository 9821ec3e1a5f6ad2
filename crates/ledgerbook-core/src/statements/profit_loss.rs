//! Profit and loss

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreResult;
use crate::ledger::Ledger;
use crate::models::{Account, Transaction};
use crate::period::DateRange;
use crate::reports::{ProfitAndLoss, ProfitLossLine};
use crate::tree::{flatten_forest, sum_roots, AccountReportNode};
use crate::types::{AccountRole, Category};

pub fn profit_and_loss(
    accounts: &[Account],
    transactions: &[Transaction],
    range: &DateRange,
) -> CoreResult<ProfitAndLoss> {
    Ledger::new(accounts.to_vec(), transactions.to_vec())?.profit_and_loss(range)
}

/// `part / whole` in percent, two decimals; `None` for a zero base
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    Some((part * Decimal::ONE_HUNDRED / whole).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Totals of the top-most cost-of-goods-sold nodes
fn cogs_total(roots: &[AccountReportNode]) -> Decimal {
    let mut total = Decimal::ZERO;
    let mut stack: Vec<&AccountReportNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        if node.role == AccountRole::CostOfGoodsSold {
            total += node.total;
        } else {
            stack.extend(node.children.iter());
        }
    }
    total
}

fn lines(roots: &[AccountReportNode], total_income: Decimal) -> Vec<ProfitLossLine> {
    flatten_forest(roots)
        .into_iter()
        .map(|node| ProfitLossLine {
            account_id: node.id.clone(),
            name: node.name.clone(),
            category: node.category,
            depth: node.depth,
            amount: node.total,
            percent_of_income: percent_of(node.total, total_income),
        })
        .collect()
}

impl Ledger {
    pub fn profit_and_loss(&self, range: &DateRange) -> CoreResult<ProfitAndLoss> {
        let income = self.account_tree(&[Category::Income], range)?;
        let expenses = self.account_tree(&[Category::Expense], range)?;

        let total_income = sum_roots(&income);
        let total_expenses = sum_roots(&expenses);
        let total_cogs = cogs_total(&expenses);
        let gross_profit = total_income - total_cogs;
        let net_profit = total_income - total_expenses;

        Ok(ProfitAndLoss {
            period: *range,
            income_lines: lines(&income, total_income),
            expense_lines: lines(&expenses, total_income),
            income,
            expenses,
            total_income,
            total_cogs,
            gross_profit,
            operating_expenses: total_expenses - total_cogs,
            total_expenses,
            net_profit,
            gross_margin_percent: percent_of(gross_profit, total_income),
            net_margin_percent: percent_of(net_profit, total_income),
        })
    }
}
