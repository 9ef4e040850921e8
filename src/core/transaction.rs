use crate::core::error::{LedgerError, Result};
use crate::core::field::{check_width, FieldSpec};
use crate::core::record::{Record, RecordBuilder, RecordKind, RecordLine};
use serde::Serialize;
use std::fmt;

pub const COUNTER: FieldSpec = FieldSpec::new("counter", 2, 6);
pub const AMOUNT: FieldSpec = FieldSpec::new("amount", 8, 12);
pub const CURRENCY: FieldSpec = FieldSpec::new("currency", 20, 3);

/// Transaction key, at most six decimal digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Counter(u32);

impl Counter {
    /// Largest value that fits the counter column
    pub const MAX: u32 = 999_999;

    pub fn new(value: u32) -> Result<Self> {
        if value > Self::MAX {
            return Err(LedgerError::FieldTooLong {
                field: COUNTER.name,
                limit: COUNTER.width,
                actual: value.to_string().len(),
            });
        }
        Ok(Counter(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

/// Ledger transaction (tag "02")
///
/// A transaction built with `counter: None` has its counter assigned when it
/// is appended to a [`LedgerStore`](crate::core::store::LedgerStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    counter: Option<Counter>,
    amount: i64,
    currency: String,
}

impl Transaction {
    pub fn new(counter: Option<Counter>, amount: i64, currency: &str) -> Result<Self> {
        let digits = amount.to_string();
        if digits.len() > AMOUNT.width {
            return Err(LedgerError::FieldTooLong {
                field: AMOUNT.name,
                limit: AMOUNT.width,
                actual: digits.len(),
            });
        }

        let currency = currency.trim();
        check_width(CURRENCY.name, currency, CURRENCY.width)?;

        Ok(Transaction {
            counter,
            amount,
            currency: currency.to_string(),
        })
    }

    /// Transaction whose counter the store assigns on append
    pub fn unassigned(amount: i64, currency: &str) -> Result<Self> {
        Self::new(None, amount, currency)
    }

    pub fn counter(&self) -> Option<Counter> {
        self.counter
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub(crate) fn assign(&mut self, counter: Counter) {
        self.counter = Some(counter);
    }
}

impl Record for Transaction {
    const KIND: RecordKind = RecordKind::Transaction;

    fn parse(line: &str) -> Result<Self> {
        let line = RecordLine::new(Self::KIND, line, CURRENCY.end())?;
        let counter = Counter::new(line.integer(COUNTER)?).map_err(|err| line.fold(err))?;
        Transaction::new(
            Some(counter),
            line.integer(AMOUNT)?,
            line.string(CURRENCY)?,
        )
        .map_err(|err| line.fold(err))
    }

    fn format(&self) -> Result<String> {
        let counter = self.counter.ok_or(LedgerError::UnassignedCounter)?;
        Ok(RecordBuilder::new(Self::KIND)
            .integer(COUNTER, counter.get())?
            .integer(AMOUNT, self.amount)?
            .string(CURRENCY, &self.currency)?
            .finish())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.counter {
            Some(counter) => write!(f, "Transaction(counter={}, ", counter)?,
            None => write!(f, "Transaction(counter=unassigned, ")?,
        }
        write!(f, "amount={}, currency={})", self.amount, self.currency)
    }
}
