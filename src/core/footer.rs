use crate::core::error::{LedgerError, Result};
use crate::core::field::FieldSpec;
use crate::core::record::{Record, RecordBuilder, RecordKind, RecordLine};
use serde::Serialize;
use std::fmt;

pub const TOTAL_COUNTER: FieldSpec = FieldSpec::new("total_counter", 2, 6);
pub const CONTROL_SUM: FieldSpec = FieldSpec::new("control_sum", 8, 12);

/// Ledger footer (last line, tag "03")
///
/// Holds the transaction count and the sum of all amounts. A footer read
/// from disk is informational; the store derives a fresh one on every save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Footer {
    total_counter: u32,
    control_sum: i64,
}

impl Footer {
    pub fn new(total_counter: u32, control_sum: i64) -> Result<Self> {
        fits(TOTAL_COUNTER, total_counter.to_string())?;
        fits(CONTROL_SUM, control_sum.to_string())?;
        Ok(Footer {
            total_counter,
            control_sum,
        })
    }

    pub fn total_counter(&self) -> u32 {
        self.total_counter
    }

    pub fn control_sum(&self) -> i64 {
        self.control_sum
    }
}

fn fits(spec: FieldSpec, digits: String) -> Result<()> {
    if digits.len() > spec.width {
        return Err(LedgerError::FieldTooLong {
            field: spec.name,
            limit: spec.width,
            actual: digits.len(),
        });
    }
    Ok(())
}

impl Record for Footer {
    const KIND: RecordKind = RecordKind::Footer;

    fn parse(line: &str) -> Result<Self> {
        let line = RecordLine::new(Self::KIND, line, CONTROL_SUM.end())?;
        Footer::new(line.integer(TOTAL_COUNTER)?, line.integer(CONTROL_SUM)?)
            .map_err(|err| line.fold(err))
    }

    fn format(&self) -> Result<String> {
        Ok(RecordBuilder::new(Self::KIND)
            .integer(TOTAL_COUNTER, self.total_counter)?
            .integer(CONTROL_SUM, self.control_sum)?
            .finish())
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Footer(total counter={}, control sum={})",
            self.total_counter, self.control_sum
        )
    }
}
