//! Ledger format core: field codec, record types, store and file I/O

pub mod config;
pub mod error;
pub mod field;
pub mod footer;
pub mod header;
pub mod io;
pub mod record;
pub mod store;
pub mod transaction;

