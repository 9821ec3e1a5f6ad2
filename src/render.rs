//! Plain-text report rendering

use ledgerbook_core::{
    AccountReportNode, BalanceSheet, CashFlowLine, DateRange, ProfitAndLoss, ProfitLossLine,
    StatementOfCashFlows, TaxReturn, TrialBalance,
};
use ledgerbook_utils::{format_amount, format_percent, AmountFormat};
use rust_decimal::Decimal;
use std::fmt::Write;

const LABEL_WIDTH: usize = 44;
const AMOUNT_WIDTH: usize = 18;

pub struct Renderer {
    format: AmountFormat,
}

impl Renderer {
    pub fn new(format: AmountFormat) -> Self {
        Self { format }
    }

    fn amount(&self, value: Decimal) -> String {
        format_amount(value, &self.format)
    }

    fn row(&self, out: &mut String, label: &str, value: Decimal) {
        let _ = writeln!(
            out,
            "{:<lw$}{:>aw$}",
            label,
            self.amount(value),
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        );
    }

    fn heading(out: &mut String, title: &str) {
        let _ = writeln!(out, "{}\n{}", title, "=".repeat(title.chars().count()));
    }

    fn status(out: &mut String, ok: bool, ok_text: &str, difference: Decimal, label: &str) {
        if ok {
            let _ = writeln!(out, "{}", ok_text);
        } else {
            let _ = writeln!(out, "WARNING: {} (difference {})", label, difference);
        }
    }

    fn nodes(&self, out: &mut String, roots: &[AccountReportNode]) {
        for root in roots {
            for node in root.flatten() {
                let label = match &node.number {
                    Some(number) => format!("{}{} {}", "  ".repeat(node.depth), number, node.name),
                    None => format!("{}{}", "  ".repeat(node.depth), node.name),
                };
                self.row(out, &label, node.total);
            }
        }
    }

    pub fn tree(&self, range: &DateRange, roots: &[AccountReportNode]) -> String {
        let mut out = String::new();
        Self::heading(&mut out, &format!("Accounts: {}", range.description()));
        self.nodes(&mut out, roots);
        out
    }

    pub fn trial_balance(&self, tb: &TrialBalance) -> String {
        let mut out = String::new();
        Self::heading(&mut out, &format!("Trial balance as of {}", tb.as_of));
        let _ = writeln!(
            out,
            "{:<lw$}{:>aw$}{:>aw$}",
            "Account",
            "Debit",
            "Credit",
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        );
        for row in &tb.rows {
            let label = match &row.number {
                Some(number) => format!("{} {}", number, row.name),
                None => row.name.clone(),
            };
            let show = |v: Decimal| if v.is_zero() { String::new() } else { self.amount(v) };
            let _ = writeln!(
                out,
                "{:<lw$}{:>aw$}{:>aw$}{}",
                label,
                show(row.debit),
                show(row.credit),
                if row.abnormal { "  *" } else { "" },
                lw = LABEL_WIDTH,
                aw = AMOUNT_WIDTH
            );
        }
        let _ = writeln!(
            out,
            "{:<lw$}{:>aw$}{:>aw$}",
            "Total",
            self.amount(tb.total_debits),
            self.amount(tb.total_credits),
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        );
        if !tb.archived_balance.is_zero() {
            self.row(&mut out, "Archived accounts (net debit)", tb.archived_balance);
        }
        Self::status(&mut out, tb.is_balanced, "Balanced", tb.difference, "debits and credits differ");
        out
    }

    pub fn balance_sheet(&self, bs: &BalanceSheet) -> String {
        let mut out = String::new();
        Self::heading(&mut out, &format!("Balance sheet as of {}", bs.as_of));

        let _ = writeln!(out, "\nAssets");
        self.nodes(&mut out, &bs.assets);
        self.row(&mut out, "Total assets", bs.total_assets);
        if !bs.archived_balance.is_zero() {
            self.row(&mut out, "Archived accounts (net debit)", bs.archived_balance);
        }

        let _ = writeln!(out, "\nLiabilities");
        self.nodes(&mut out, &bs.liabilities);
        self.row(&mut out, "Total liabilities", bs.total_liabilities);

        let _ = writeln!(out, "\nEquity");
        self.nodes(&mut out, &bs.equity);
        self.row(&mut out, "Current earnings", bs.current_earnings);
        self.row(&mut out, "Total equity", bs.total_equity);

        let _ = writeln!(out);
        self.row(&mut out, "Liabilities and equity", bs.total_liabilities + bs.total_equity);
        Self::status(&mut out, bs.is_balanced, "Balanced", bs.difference, "balance sheet does not balance");
        out
    }

    fn pl_lines(&self, out: &mut String, lines: &[ProfitLossLine]) {
        for line in lines {
            let _ = writeln!(
                out,
                "{:<lw$}{:>aw$}{:>10}",
                format!("{}{}", "  ".repeat(line.depth), line.name),
                self.amount(line.amount),
                format_percent(line.percent_of_income),
                lw = LABEL_WIDTH,
                aw = AMOUNT_WIDTH
            );
        }
    }

    pub fn profit_and_loss(&self, pl: &ProfitAndLoss) -> String {
        let mut out = String::new();
        Self::heading(&mut out, &format!("Profit and loss: {}", pl.period.description()));

        let _ = writeln!(out, "\nIncome");
        self.pl_lines(&mut out, &pl.income_lines);
        self.row(&mut out, "Total income", pl.total_income);

        let _ = writeln!(out, "\nExpenses");
        self.pl_lines(&mut out, &pl.expense_lines);
        self.row(&mut out, "Total expenses", pl.total_expenses);

        let _ = writeln!(out);
        self.row(&mut out, "Cost of goods sold", pl.total_cogs);
        self.row(&mut out, "Gross profit", pl.gross_profit);
        self.row(&mut out, "Operating expenses", pl.operating_expenses);
        self.row(&mut out, "Net profit", pl.net_profit);
        let _ = writeln!(
            out,
            "Gross margin {}, net margin {}",
            format_percent(pl.gross_margin_percent),
            format_percent(pl.net_margin_percent)
        );
        out
    }

    fn cf_lines(&self, out: &mut String, lines: &[CashFlowLine]) {
        for line in lines {
            self.row(out, &format!("  {}", line.name), line.amount);
        }
    }

    pub fn cash_flow(&self, cf: &StatementOfCashFlows) -> String {
        let mut out = String::new();
        Self::heading(&mut out, &format!("Cash flows: {} to {}", cf.start, cf.end));

        let _ = writeln!(out, "\nOperating activities");
        self.row(&mut out, "  Net income", cf.net_income);
        self.row(&mut out, "  Depreciation and amortization", cf.depreciation_amortization);
        self.row(&mut out, "  Change in receivables", cf.receivables_change);
        self.row(&mut out, "  Change in inventory", cf.inventory_change);
        self.row(&mut out, "  Change in prepayments", cf.prepayments_change);
        self.row(&mut out, "  Change in payables", cf.payables_change);
        self.row(&mut out, "Cash from operations", cf.cash_from_operations);

        let _ = writeln!(out, "\nInvesting activities");
        self.cf_lines(&mut out, &cf.investing_lines);
        self.row(&mut out, "Cash from investing", cf.cash_from_investing);

        let _ = writeln!(out, "\nFinancing activities");
        self.cf_lines(&mut out, &cf.financing_lines);
        self.row(&mut out, "Cash from financing", cf.cash_from_financing);

        let _ = writeln!(out);
        self.row(&mut out, "Net change in cash", cf.net_change_in_cash);
        self.row(&mut out, "Cash at start", cf.start_cash);
        self.row(&mut out, "Cash at end", cf.end_cash);
        Self::status(
            &mut out,
            cf.is_reconciled,
            "Reconciled",
            cf.reconciliation_difference,
            "cash movement does not reconcile",
        );
        out
    }

    pub fn tax_return(&self, vat: &TaxReturn) -> String {
        let mut out = String::new();
        Self::heading(&mut out, &format!("VAT return: {}", vat.period.description()));
        self.row(&mut out, "Net sales", vat.net_sales);
        self.row(&mut out, "Output tax", vat.output_tax);
        self.row(&mut out, "Net purchases", vat.net_purchases);
        self.row(&mut out, "Input tax", vat.input_tax);
        self.row(&mut out, "Net VAT payable", vat.net_vat_payable);

        if !vat.by_tax_code.is_empty() {
            let _ = writeln!(out, "\nBy tax code");
            for code in &vat.by_tax_code {
                self.row(
                    &mut out,
                    &format!("  {} {} output", code.tax_code_id, code.name),
                    code.output_tax,
                );
                self.row(
                    &mut out,
                    &format!("  {} {} input", code.tax_code_id, code.name),
                    code.input_tax,
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerbook_core::{Account, AccountRole, Category, Ledger, Transaction};
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ledger() -> Ledger {
        let accounts = vec![
            Account::new("1", "Cash", Category::Asset).with_number("1000").with_role(AccountRole::Cash),
            Account::new("2", "Sales", Category::Income).with_number("4000"),
            Account::new("3", "Rent", Category::Expense).with_number("6000"),
        ];
        let transactions = vec![
            Transaction::new("t1", d(2024, 1, 5), "1", dec!(1000)),
            Transaction::new("t2", d(2024, 1, 5), "2", dec!(-1000)),
            Transaction::new("t3", d(2024, 1, 10), "1", dec!(-200)),
            Transaction::new("t4", d(2024, 1, 10), "3", dec!(200)),
        ];
        Ledger::new(accounts, transactions).unwrap()
    }

    #[test]
    fn test_trial_balance_columns() {
        let text = Renderer::new(AmountFormat::default()).trial_balance(&ledger().trial_balance(d(2024, 1, 31)));
        assert!(text.contains("1000 Cash"));
        assert!(text.contains("800.00"));
        assert!(text.lines().any(|l| l.starts_with("Total") && l.matches("1,000.00").count() == 2));
        assert!(text.ends_with("Balanced\n"));
    }

    #[test]
    fn test_cash_flow_reconciled() {
        let cf = ledger().cash_flow(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let text = Renderer::new(AmountFormat::default()).cash_flow(&cf);
        assert!(text.contains("Cash from operations"));
        assert!(text.ends_with("Reconciled\n"));
    }
}
