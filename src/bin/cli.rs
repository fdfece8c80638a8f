use tourshare::{Session,
    backend::{JsonStore, FileKeyValueStore},
    config::AppConfig,
    render::{self, StderrNotifier, TerminalRenderer},
    session::Silent};

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "tourshare=warn";

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Configuration file (TOML)
    #[clap(short, long, env = "TOURSHARE_CONFIG", value_parser)]
    config: Option<PathBuf>,

    /// Directory holding the stored ledger, overrides the config file
    #[clap(short, long, env = "TOURSHARE_DATA_DIR", value_parser)]
    data_dir: Option<PathBuf>,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Record a revenue entry and show the updated dashboard
    Add(AddEntry),
    /// Show totals, charts and recent transactions
    Dashboard,
    /// Show total revenue, community fund and individual earnings
    Totals,
    /// Show revenue per activity
    Breakdown,
    /// List the most recent transactions, newest first
    Recent(Recent),
    /// Show the revenue-share table in use
    Shares
}

#[derive(Args, Debug)]
struct AddEntry {
    /// One of homestay, guided-tour, food, handicraft
    #[clap(short, long, value_parser)]
    activity: String,

    /// Gross revenue, must be a positive number
    #[clap(short = 'm', long, value_parser, allow_hyphen_values = true)]
    amount: String,

    /// Person receiving the revenue
    #[clap(short, long, value_parser)]
    beneficiary: String
}

#[derive(Args, Debug)]
struct Recent {
    /// Number of transactions to list
    #[clap(short = 'n', long, value_parser)]
    count: Option<usize>
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(args: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::locate(args.config.as_deref())?;
    let share_table = config.share_table()?;
    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir());
    let currency = config.display.currency.as_str();
    let recent_limit = config.display.recent_limit;

    let store = JsonStore::with_key(FileKeyValueStore::new(&data_dir), &config.storage.key);

    let view = match args.action {
        Subcommands::Add(entry) => {
            let mut session = Session::open(share_table, store, StderrNotifier, TerminalRenderer::new(currency))
                .with_recent_limit(recent_limit);
            return match session.submit(&entry.activity, &entry.amount, &entry.beneficiary) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(_) => Ok(ExitCode::FAILURE)
            };
        },
        view => view
    };

    let session = Session::open(share_table, store, Silent, Silent)
        .with_recent_limit(recent_limit);
    let dashboard = session.dashboard();

    match view {
        Subcommands::Dashboard | Subcommands::Add(_) => {
            print!("{}", render::dashboard(&dashboard, currency));
        },
        Subcommands::Totals => {
            print!("{}", render::totals_block(&dashboard, currency));
        },
        Subcommands::Breakdown => {
            if dashboard.breakdown.is_empty() {
                println!("{}", "No revenue recorded yet.".dimmed());
            } else {
                print!("{}", render::activity_chart(&dashboard, currency));
            }
        },
        Subcommands::Recent(recent) => {
            let count = recent.count.unwrap_or(recent_limit);
            let transactions: Vec<_> = session.ledger().recent_transactions(count)
                .into_iter().cloned().collect();
            print!("{}", render::transaction_table(&transactions, currency));
        },
        Subcommands::Shares => {
            print!("{}", render::share_table(session.ledger().share_table()));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_logging();
    let args = Cli::parse();

    match run(args).with_context(|| "tourshare-cli failed") {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
