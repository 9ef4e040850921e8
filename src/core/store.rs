//! In-memory ledger
//!
//! Holds the header, the transactions in file order and the footer that was
//! read from storage. The footer written on persist is always derived from
//! the live transactions.

use crate::core::error::{LedgerError, Result};
use crate::core::footer::Footer;
use crate::core::header::Header;
use crate::core::record::{Record, RecordKind};
use crate::core::transaction::{Counter, Transaction};
use ahash::AHashMap;
use std::io::{BufRead, Write};
use tracing::debug;

/// Ceiling for auto-assigned transaction counters
pub const MAX_TRANSACTIONS: u32 = 20_000;

/// Ledger held in memory between load and persist
///
/// Transactions are keyed by counter. Appending a counter that is already
/// present replaces that entry in place, so file order survives a save.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    header: Header,
    transactions: Vec<Transaction>,
    index: AHashMap<Counter, usize>,
    stored_footer: Option<Footer>,
}

impl LedgerStore {
    /// Create an empty ledger
    pub fn new(header: Header) -> Self {
        LedgerStore {
            header,
            transactions: Vec::new(),
            index: AHashMap::new(),
            stored_footer: None,
        }
    }

    /// Read a ledger from `source`
    ///
    /// The first line is the header and the last line is the footer; every
    /// line between them is a transaction.
    pub fn load<R: BufRead>(source: R) -> Result<Self> {
        let mut lines = Vec::new();
        for line in source.split(b'\n') {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(line);
        }

        if lines.len() < 2 {
            return Err(LedgerError::TruncatedInput { lines: lines.len() });
        }

        let last = lines.len() - 1;
        let header = Header::parse(line_text(&lines, 0)?).map_err(|err| err.at_line(1))?;
        let footer =
            Footer::parse(line_text(&lines, last)?).map_err(|err| err.at_line(last + 1))?;

        let mut store = LedgerStore::new(header);
        for idx in 1..last {
            let transaction = Transaction::parse(line_text(&lines, idx)?)
                .map_err(|err| err.at_line(idx + 1))?;
            let counter = transaction
                .counter()
                .ok_or(LedgerError::UnassignedCounter)?;
            store.insert(counter, transaction);
        }
        store.stored_footer = Some(footer);

        debug!(
            lines = lines.len(),
            transactions = store.len(),
            "Loaded ledger"
        );
        Ok(store)
    }

    /// Store a transaction, assigning its counter if it has none
    ///
    /// Returns the key the transaction was stored under. The assigned counter
    /// is `len() + 1`; if an explicit counter already holds that key, the
    /// auto-assigned transaction replaces it, and so does every later
    /// auto-assigned append until the count moves past it.
    pub fn append_transaction(&mut self, mut transaction: Transaction) -> Result<Counter> {
        let counter = match transaction.counter() {
            Some(counter) => counter,
            None => {
                let next = self.transactions.len() as u32 + 1;
                if next > MAX_TRANSACTIONS {
                    debug!(limit = MAX_TRANSACTIONS, "Rejected auto-assigned transaction");
                    return Err(LedgerError::CapacityExceeded {
                        limit: MAX_TRANSACTIONS,
                    });
                }
                let counter = Counter::new(next)?;
                transaction.assign(counter);
                counter
            }
        };
        self.insert(counter, transaction);
        Ok(counter)
    }

    /// Upsert under `counter`, keeping the original position on collision
    fn insert(&mut self, counter: Counter, transaction: Transaction) {
        match self.index.get(&counter) {
            Some(&position) => {
                debug!(%counter, "Replacing transaction with duplicate counter");
                self.transactions[position] = transaction;
            }
            None => {
                self.index.insert(counter, self.transactions.len());
                self.transactions.push(transaction);
            }
        }
    }

    /// Footer for the current transactions
    pub fn derive_footer(&self) -> Result<Footer> {
        let control_sum: i64 = self.transactions.iter().map(Transaction::amount).sum();
        Footer::new(self.transactions.len() as u32, control_sum)
    }

    /// Check the footer read at load time against the live transactions
    pub fn verify_footer(&self) -> Result<()> {
        let derived = self.derive_footer()?;
        match self.stored_footer {
            Some(stored) if stored != derived => {
                Err(LedgerError::FooterMismatch { stored, derived })
            }
            _ => Ok(()),
        }
    }

    /// Write header, transactions and a freshly derived footer to `destination`
    ///
    /// Every line ends with a single `\n`. A failed write leaves `destination`
    /// partially written.
    pub fn persist<W: Write>(&self, mut destination: W) -> Result<()> {
        let footer = self.derive_footer()?;

        writeln!(destination, "{}", self.header.format()?)?;
        for transaction in &self.transactions {
            writeln!(destination, "{}", transaction.format()?)?;
        }
        writeln!(destination, "{}", footer.format()?)?;
        destination.flush()?;

        debug!(
            transactions = footer.total_counter(),
            control_sum = footer.control_sum(),
            "Persisted ledger"
        );
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Transactions in file order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn get(&self, counter: Counter) -> Option<&Transaction> {
        self.index
            .get(&counter)
            .map(|&position| &self.transactions[position])
    }

    /// Footer as read from storage, if this ledger was loaded
    pub fn stored_footer(&self) -> Option<&Footer> {
        self.stored_footer.as_ref()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Decode line `idx` of a raw ledger, attributing bad UTF-8 to the record at that position
fn line_text(lines: &[Vec<u8>], idx: usize) -> Result<&str> {
    std::str::from_utf8(&lines[idx]).map_err(|err| {
        let record = match idx {
            0 => RecordKind::Header,
            i if i == lines.len() - 1 => RecordKind::Footer,
            _ => RecordKind::Transaction,
        };
        LedgerError::MalformedRecord {
            record,
            reason: format!("line {}: invalid UTF-8: {}", idx + 1, err),
        }
    })
}
