//! # flatledger - Fixed-Width Flat-File Ledger
//!
//! `flatledger` reads and writes ledgers made of 120-character ASCII lines:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ line 1       Header       "01" name(28) surname(30)          │
//! │                                patronymic(30) address(30)    │
//! ├──────────────────────────────────────────────────────────────┤
//! │ lines 2..N-1 Transaction  "02" counter(6) amount(12)         │
//! │                                currency(3), space padded     │
//! ├──────────────────────────────────────────────────────────────┤
//! │ line N       Footer       "03" total_counter(6)              │
//! │                                control_sum(12), space padded │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The footer is never trusted after load: every save writes the current
//! transaction count and the sum of all amounts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flatledger::{Header, LedgerFile, Result, Transaction};
//!
//! # fn main() -> Result<()> {
//! let header = Header::new("Ola", "Nowak", "Marta", "Grzybowska")?;
//! let mut file = LedgerFile::create("first.db", &header)?;
//!
//! let mut ledger = file.load()?;
//! let counter = ledger.append_transaction(Transaction::unassigned(8000, "PLN")?)?;
//! println!("stored as {}", counter);
//!
//! file.persist(&ledger)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## In-Memory Use
//!
//! ```rust
//! use flatledger::{Counter, Header, LedgerStore, Transaction};
//!
//! # fn main() -> flatledger::Result<()> {
//! let mut ledger = LedgerStore::new(Header::new("Ola", "Nowak", "Marta", "Grzybowska")?);
//! for amount in [8000, 1500, -200] {
//!     ledger.append_transaction(Transaction::unassigned(amount, "PLN")?)?;
//! }
//! ledger.append_transaction(Transaction::new(Some(Counter::new(42)?), 10, "EUR")?)?;
//!
//! let footer = ledger.derive_footer()?;
//! assert_eq!(footer.total_counter(), 4);
//! assert_eq!(footer.control_sum(), 9310);
//!
//! let mut bytes = Vec::new();
//! ledger.persist(&mut bytes)?;
//! assert_eq!(bytes.len(), 6 * 121);
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::{
    config::LedgerConfig,
    error::{LedgerError, Result},
    footer::Footer,
    header::Header,
    io::LedgerFile,
    record::{Record, RecordKind, RECORD_WIDTH},
    store::{LedgerStore, MAX_TRANSACTIONS},
    transaction::{Counter, Transaction},
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
