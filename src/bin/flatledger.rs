//! flatledger CLI
//!
//! Creates, appends to, prints and verifies fixed-width ledger files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flatledger::{
    Counter, Footer, Header, LedgerConfig, LedgerError, LedgerFile, LedgerStore, Transaction,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flatledger")]
#[command(about = "Read and write fixed-width flat-file ledgers")]
struct Args {
    /// Ledger file (overrides the configured path)
    #[arg(short = 'f', long, global = true)]
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new ledger file with the given header
    Init {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        patronymic: String,
        #[arg(long)]
        address: String,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Append one transaction and save the ledger
    Append {
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
        /// Currency code (defaults to the configured currency)
        #[arg(long)]
        currency: Option<String>,
        /// Explicit counter; assigned automatically when omitted
        #[arg(long)]
        counter: Option<u32>,
    },

    /// Print header, transactions and derived totals
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Compare the stored footer with the totals of the stored transactions
    Verify,
}

#[derive(Serialize)]
struct Report<'a> {
    header: &'a Header,
    transactions: Vec<&'a Transaction>,
    footer: Footer,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LedgerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LedgerConfig::default(),
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = args.file.clone().unwrap_or_else(|| config.path.clone());

    match args.command {
        Command::Init {
            name,
            surname,
            patronymic,
            address,
            force,
        } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to replace it)", path.display());
            }
            let header = Header::new(&name, &surname, &patronymic, &address)?;
            LedgerFile::create(&path, &header)
                .with_context(|| format!("creating {}", path.display()))?;
            println!("Created {}", path.display());
        }

        Command::Append {
            amount,
            currency,
            counter,
        } => {
            let mut file =
                LedgerFile::open(&path).with_context(|| format!("opening {}", path.display()))?;
            let mut store = file.load()?;

            let counter = counter.map(Counter::new).transpose()?;
            let currency = currency.unwrap_or_else(|| config.default_currency.clone());
            let transaction = Transaction::new(counter, amount, &currency)?;

            let assigned = store.append_transaction(transaction)?;
            file.persist(&store)?;

            info!(%assigned, amount, currency = %currency, "Appended transaction");
            println!("{}", assigned);
        }

        Command::Show { json } => {
            let store = load_read_only(&path)?;
            let report = Report {
                header: store.header(),
                transactions: store.transactions().collect(),
                footer: store.derive_footer()?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.header);
                for transaction in &report.transactions {
                    println!("{}", transaction);
                }
                println!("{}", report.footer);
            }
        }

        Command::Verify => {
            let store = load_read_only(&path)?;
            match store.verify_footer() {
                Ok(()) => println!("OK: {}", store.derive_footer()?),
                Err(err @ LedgerError::FooterMismatch { .. }) => {
                    error!(path = %path.display(), "{}", err);
                    bail!(err);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

fn load_read_only(path: &Path) -> Result<LedgerStore> {
    let mut file = LedgerFile::open_read_only(path)
        .with_context(|| format!("opening {}", path.display()))?;
    Ok(file.load()?)
}
