//! ledgerbook main entry point

mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use ledgerbook_config::{Config, ConfigError, SymbolPosition};
use ledgerbook_core::{Books, Category, DateRange};
use ledgerbook_snapshot::{FileSnapshotSource, SnapshotSource, SnapshotSourceRef};
use ledgerbook_utils::AmountFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

use render::Renderer;

const DEFAULT_CONFIG: &str = "ledgerbook.yaml";

#[derive(Parser, Debug)]
#[command(name = "ledgerbook")]
#[command(version = "0.1.0")]
#[command(about = "Derive financial statements from a ledger snapshot", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file, overrides the configured data path
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Account hierarchy with rolled-up totals
    Tree {
        /// Categories to include (repeatable)
        #[arg(long = "category", required = true)]
        categories: Vec<Category>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Debit/credit listing of all balances
    TrialBalance {
        #[arg(long)]
        as_of: NaiveDate,
    },
    /// Assets, liabilities and equity at a date
    BalanceSheet {
        #[arg(long)]
        as_of: NaiveDate,
    },
    /// Income and expenses for a period
    ProfitLoss(PeriodArgs),
    /// Indirect-method cash flow statement
    CashFlow(PeriodArgs),
    /// VAT return from invoices and bills
    TaxReturn(PeriodArgs),
}

#[derive(clap::Args, Debug)]
struct PeriodArgs {
    /// First day, defaults to the start of the fiscal year containing --to
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day (inclusive)
    #[arg(long)]
    to: NaiveDate,
}

impl PeriodArgs {
    fn range(&self, fiscal_year_start: u32) -> Result<DateRange> {
        let range = match self.from {
            Some(from) => DateRange::between(from, self.to)?,
            None => DateRange::fiscal_year_to_date(self.to, fiscal_year_start)?,
        };
        Ok(range)
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => match Config::load(DEFAULT_CONFIG) {
            Ok(config) => Ok(config),
            Err(ConfigError::FileNotFound { .. }) => Ok(Config::default()),
            Err(e) => Err(e).context("Failed to load configuration"),
        },
    }
}

fn amount_format(config: &Config) -> AmountFormat {
    AmountFormat {
        decimal_places: config.currency.decimal_places,
        thousands_separator: config.currency.thousands_separator.clone(),
        decimal_separator: config.currency.decimal_separator.clone(),
        currency: Some(config.currency.default_currency.clone()),
        currency_before: config.currency.symbol_position == SymbolPosition::Before,
    }
}

fn emit<T: Serialize>(format: OutputFormat, report: &T, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

fn run(args: Args, config: Config) -> Result<()> {
    let snapshot_path = args.snapshot.clone().unwrap_or_else(|| config.snapshot_path());
    log::info!("Loading snapshot {}", snapshot_path.display());

    let source: SnapshotSourceRef = Arc::new(FileSnapshotSource);
    let rt = Runtime::new()?;
    let document = rt
        .block_on(source.load(snapshot_path.clone()))
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;

    let books = Books::from_document(document, &config.reporting)?;
    if !books.inferred_roles().is_empty() {
        log::info!("Inferred roles for {} account(s)", books.inferred_roles().len());
    }

    let ledger = books.ledger();
    let renderer = Renderer::new(amount_format(&config));
    let fiscal_start = config.reporting.fiscal_year_start;

    match &args.command {
        Command::Tree {
            categories,
            from,
            to,
        } => {
            let range = DateRange::new(*from, *to)?;
            let tree = ledger.account_tree(categories, &range)?;
            emit(args.format, &tree, || renderer.tree(&range, &tree))
        }
        Command::TrialBalance { as_of } => {
            let tb = ledger.trial_balance(*as_of);
            emit(args.format, &tb, || renderer.trial_balance(&tb))
        }
        Command::BalanceSheet { as_of } => {
            let bs = ledger.balance_sheet(*as_of)?;
            emit(args.format, &bs, || renderer.balance_sheet(&bs))
        }
        Command::ProfitLoss(period) => {
            let pl = ledger.profit_and_loss(&period.range(fiscal_start)?)?;
            emit(args.format, &pl, || renderer.profit_and_loss(&pl))
        }
        Command::CashFlow(period) => {
            let range = period.range(fiscal_start)?;
            let start = range.start.unwrap_or(period.to);
            let cf = ledger.cash_flow(start, period.to)?;
            emit(args.format, &cf, || renderer.cash_flow(&cf))
        }
        Command::TaxReturn(period) => {
            let vat = books.tax_return(&period.range(fiscal_start)?)?;
            emit(args.format, &vat, || renderer.tax_return(&vat))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    run(args, config)
}
