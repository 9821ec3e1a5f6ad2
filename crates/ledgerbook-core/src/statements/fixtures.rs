//! Small trading company used across statement tests.
//!
//! Q1 2024 (Jan 1 - Mar 31): net income 2250, closing bank 11000.
//! April 2024: a 700 cash sale and a 1000 loan repayment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::ledger::Ledger;
use crate::models::{Account, Transaction};
use crate::types::{AccountRole, Category};

pub(crate) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub(crate) fn accounts() -> Vec<Account> {
    use AccountRole::*;
    use Category::*;
    vec![
        Account::new("current", "Current assets", Asset).with_number("1000"),
        Account::new("bank", "Bank", Asset)
            .with_number("1010")
            .with_parent("current")
            .with_role(Cash),
        Account::new("ar", "Accounts receivable", Asset)
            .with_number("1100")
            .with_parent("current")
            .with_role(Receivable),
        Account::new("inv", "Inventory", Asset)
            .with_number("1200")
            .with_parent("current")
            .with_role(Inventory),
        Account::new("prepaid", "Prepaid insurance", Asset)
            .with_number("1300")
            .with_parent("current")
            .with_role(Prepayment),
        Account::new("equip", "Equipment", Asset).with_number("1500"),
        Account::new("accdep", "Accumulated depreciation", Asset)
            .with_number("1510")
            .with_parent("equip")
            .with_role(AccumulatedDepreciation),
        Account::new("legacy", "Old savings", Asset)
            .with_number("1900")
            .archived(),
        Account::new("ap", "Accounts payable", Liability)
            .with_number("2000")
            .with_role(Payable),
        Account::new("loan", "Bank loan", Liability).with_number("2500"),
        Account::new("capital", "Owner capital", Equity).with_number("3000"),
        Account::new("sales", "Sales", Income).with_number("4000"),
        Account::new("cogs", "Cost of goods sold", Expense)
            .with_number("5000")
            .with_role(CostOfGoodsSold),
        Account::new("opex", "Operating expenses", Expense).with_number("6000"),
        Account::new("rent", "Rent", Expense)
            .with_number("6100")
            .with_parent("opex"),
        Account::new("insurance", "Insurance", Expense)
            .with_number("6200")
            .with_parent("opex"),
        Account::new("dep", "Depreciation", Expense)
            .with_number("6300")
            .with_parent("opex")
            .with_role(DepreciationAmortization),
    ]
}

/// Appends one balanced journal entry as individual postings
pub(crate) fn entry(
    out: &mut Vec<Transaction>,
    id: &str,
    date: NaiveDate,
    legs: &[(&str, Decimal)],
) {
    for (i, (account, amount)) in legs.iter().enumerate() {
        out.push(Transaction::new(
            format!("{}-{}", id, i + 1),
            date,
            *account,
            *amount,
        ));
    }
}

pub(crate) fn transactions() -> Vec<Transaction> {
    let mut t = Vec::new();
    entry(&mut t, "e1", d(2024, 1, 1), &[("bank", dec!(10000)), ("capital", dec!(-10000))]);
    entry(&mut t, "e2", d(2024, 1, 15), &[("equip", dec!(3000)), ("bank", dec!(-3000))]);
    entry(&mut t, "e3", d(2024, 2, 1), &[("bank", dec!(5000)), ("loan", dec!(-5000))]);
    entry(&mut t, "e4", d(2024, 2, 10), &[("inv", dec!(4000)), ("ap", dec!(-4000))]);
    entry(
        &mut t,
        "e5",
        d(2024, 3, 5),
        &[
            ("ar", dec!(6000)),
            ("sales", dec!(-6000)),
            ("cogs", dec!(2500)),
            ("inv", dec!(-2500)),
        ],
    );
    entry(&mut t, "e6", d(2024, 3, 20), &[("bank", dec!(4000)), ("ar", dec!(-4000))]);
    entry(&mut t, "e7", d(2024, 3, 25), &[("ap", dec!(3000)), ("bank", dec!(-3000))]);
    entry(&mut t, "e8", d(2024, 3, 31), &[("rent", dec!(800)), ("bank", dec!(-800))]);
    entry(&mut t, "e9", d(2024, 1, 2), &[("prepaid", dec!(1200)), ("bank", dec!(-1200))]);
    entry(&mut t, "e10", d(2024, 3, 31), &[("insurance", dec!(300)), ("prepaid", dec!(-300))]);
    entry(&mut t, "e11", d(2024, 3, 31), &[("dep", dec!(150)), ("accdep", dec!(-150))]);
    entry(&mut t, "e12", d(2024, 4, 10), &[("bank", dec!(700)), ("sales", dec!(-700))]);
    entry(&mut t, "e13", d(2024, 4, 15), &[("loan", dec!(1000)), ("bank", dec!(-1000))]);
    t
}

pub(crate) fn ledger() -> Ledger {
    Ledger::new(accounts(), transactions()).unwrap()
}

/// Cash / Sales / Rent ledger with one sale and one rent payment
pub(crate) fn simple_ledger() -> Ledger {
    let accounts = vec![
        Account::new("1", "Cash", Category::Asset).with_role(AccountRole::Cash),
        Account::new("2", "Sales", Category::Income),
        Account::new("3", "Rent", Category::Expense),
    ];
    let transactions = vec![
        Transaction::new("t1", d(2024, 1, 5), "1", dec!(1000)),
        Transaction::new("t2", d(2024, 1, 5), "2", dec!(-1000)),
        Transaction::new("t3", d(2024, 1, 10), "1", dec!(-200)),
        Transaction::new("t4", d(2024, 1, 10), "3", dec!(200)),
    ];
    Ledger::new(accounts, transactions).unwrap()
}
