//! Basic enumerations of the chart of accounts

use serde::{Deserialize, Serialize};

/// Account category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Cash, bank, receivables, fixed assets
    Asset,
    /// Payables, loans, tax owed
    Liability,
    /// Owner's capital, retained earnings
    Equity,
    /// Sales, interest received
    Income,
    /// Rent, wages, cost of goods sold
    Expense,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Asset,
        Category::Liability,
        Category::Equity,
        Category::Income,
        Category::Expense,
    ];

    /// Side on which a positive balance of this category conventionally sits
    pub fn normal_side(self) -> NormalSide {
        match self {
            Category::Asset | Category::Expense => NormalSide::Debit,
            Category::Liability | Category::Equity | Category::Income => NormalSide::Credit,
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "assets" => Ok(Category::Asset),
            "liability" | "liabilities" => Ok(Category::Liability),
            "equity" => Ok(Category::Equity),
            "income" | "revenue" => Ok(Category::Income),
            "expense" | "expenses" => Ok(Category::Expense),
            _ => Err(format!("Invalid account category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Asset => write!(f, "asset"),
            Category::Liability => write!(f, "liability"),
            Category::Equity => write!(f, "equity"),
            Category::Income => write!(f, "income"),
            Category::Expense => write!(f, "expense"),
        }
    }
}

/// Debit or credit side of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    Debit,
    Credit,
}

impl std::fmt::Display for NormalSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalSide::Debit => write!(f, "debit"),
            NormalSide::Credit => write!(f, "credit"),
        }
    }
}

/// Functional role of an account, set when the account is created.
///
/// Statement derivers select accounts by role instead of by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Cash on hand and bank accounts
    Cash,
    /// Trade receivables
    Receivable,
    /// Stock held for sale
    Inventory,
    /// Prepaid expenses
    Prepayment,
    /// Contra-asset offsetting depreciation charges
    AccumulatedDepreciation,
    /// Trade payables
    Payable,
    /// Direct cost of sales
    CostOfGoodsSold,
    /// Non-cash depreciation and amortization charge
    DepreciationAmortization,
    #[default]
    Other,
}

impl AccountRole {
    /// Category an account must have to carry this role, `None` if any
    pub fn required_category(self) -> Option<Category> {
        match self {
            AccountRole::Cash
            | AccountRole::Receivable
            | AccountRole::Inventory
            | AccountRole::Prepayment
            | AccountRole::AccumulatedDepreciation => Some(Category::Asset),
            AccountRole::Payable => Some(Category::Liability),
            AccountRole::CostOfGoodsSold | AccountRole::DepreciationAmortization => {
                Some(Category::Expense)
            }
            AccountRole::Other => None,
        }
    }

    pub fn is_compatible_with(self, category: Category) -> bool {
        self.required_category().map_or(true, |c| c == category)
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "cash" | "bank" => Ok(AccountRole::Cash),
            "receivable" => Ok(AccountRole::Receivable),
            "inventory" => Ok(AccountRole::Inventory),
            "prepayment" => Ok(AccountRole::Prepayment),
            "accumulated_depreciation" => Ok(AccountRole::AccumulatedDepreciation),
            "payable" => Ok(AccountRole::Payable),
            "cost_of_goods_sold" | "cogs" => Ok(AccountRole::CostOfGoodsSold),
            "depreciation_amortization" | "depreciation" => {
                Ok(AccountRole::DepreciationAmortization)
            }
            "other" | "" => Ok(AccountRole::Other),
            _ => Err(format!("Invalid account role: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccountRole::Cash => "cash",
            AccountRole::Receivable => "receivable",
            AccountRole::Inventory => "inventory",
            AccountRole::Prepayment => "prepayment",
            AccountRole::AccumulatedDepreciation => "accumulated_depreciation",
            AccountRole::Payable => "payable",
            AccountRole::CostOfGoodsSold => "cost_of_goods_sold",
            AccountRole::DepreciationAmortization => "depreciation_amortization",
            AccountRole::Other => "other",
        };
        write!(f, "{}", s)
    }
}
