use crate::core::error::Result;
use crate::core::field::{check_width, FieldSpec};
use crate::core::record::{Record, RecordBuilder, RecordKind, RecordLine, RECORD_WIDTH};
use serde::Serialize;
use std::fmt;

pub const NAME: FieldSpec = FieldSpec::new("name", 2, 28);
pub const SURNAME: FieldSpec = FieldSpec::new("surname", 30, 30);
pub const PATRONYMIC: FieldSpec = FieldSpec::new("patronymic", 60, 30);
pub const ADDRESS: FieldSpec = FieldSpec::new("address", 90, 30);

/// Ledger header (first line, tag "01")
///
/// Identifies the ledger owner. All fields are trimmed on construction and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    name: String,
    surname: String,
    patronymic: String,
    address: String,
}

impl Header {
    /// Create a header, rejecting any field longer than its column
    pub fn new(name: &str, surname: &str, patronymic: &str, address: &str) -> Result<Self> {
        Ok(Header {
            name: checked(NAME, name)?,
            surname: checked(SURNAME, surname)?,
            patronymic: checked(PATRONYMIC, patronymic)?,
            address: checked(ADDRESS, address)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn patronymic(&self) -> &str {
        &self.patronymic
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

fn checked(spec: FieldSpec, value: &str) -> Result<String> {
    let value = value.trim();
    check_width(spec.name, value, spec.width)?;
    Ok(value.to_string())
}

impl Record for Header {
    const KIND: RecordKind = RecordKind::Header;

    /// Every header field is text, so a line with its trailing spaces
    /// stripped is padded back to full width before parsing.
    fn parse(line: &str) -> Result<Self> {
        let padded = format!("{:<width$}", line, width = RECORD_WIDTH);
        let line = RecordLine::new(Self::KIND, &padded, ADDRESS.end())?;
        Header::new(
            line.string(NAME)?,
            line.string(SURNAME)?,
            line.string(PATRONYMIC)?,
            line.string(ADDRESS)?,
        )
        .map_err(|err| line.fold(err))
    }

    fn format(&self) -> Result<String> {
        Ok(RecordBuilder::new(Self::KIND)
            .string(NAME, &self.name)?
            .string(SURNAME, &self.surname)?
            .string(PATRONYMIC, &self.patronymic)?
            .string(ADDRESS, &self.address)?
            .finish())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Header(name={}, surname={}, patronymic={}, address={})",
            self.name, self.surname, self.patronymic, self.address
        )
    }
}
