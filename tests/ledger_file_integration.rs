//! End-to-end tests for ledger files on disk
//!
//! Covers load, append and persist against real files, including files whose
//! stored footer is stale or whose lines are damaged.

use flatledger::{
    Counter, Footer, Header, LedgerError, LedgerFile, Record, RecordKind, Transaction,
    MAX_TRANSACTIONS,
};
use std::io::{Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

fn header() -> Header {
    Header::new("Ola", "Nowak", "Marta", "Grzybowska").unwrap()
}

fn transaction(counter: u32, amount: i64) -> Transaction {
    Transaction::new(Some(Counter::new(counter).unwrap()), amount, "PLN").unwrap()
}

/// Helper: Write a ledger image line by line
fn write_ledger(footer: Footer, transactions: &[Transaction]) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    writeln!(temp, "{}", header().format().unwrap()).unwrap();
    for tx in transactions {
        writeln!(temp, "{}", tx.format().unwrap()).unwrap();
    }
    writeln!(temp, "{}", footer.format().unwrap()).unwrap();
    temp.flush().unwrap();
    temp
}

#[test]
fn test_load_then_persist_recomputes_footer() {
    let temp = write_ledger(
        Footer::new(99, 123_456).unwrap(),
        &[transaction(1, 100), transaction(2, 200)],
    );

    let mut file = LedgerFile::open(temp.path()).unwrap();
    let store = file.load().unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.header().surname(), "Nowak");
    assert_eq!(store.header().address(), "Grzybowska");

    file.persist(&store).unwrap();
    drop(file);

    let text = std::fs::read_to_string(temp.path()).unwrap();
    let footer = Footer::parse(text.lines().last().unwrap()).unwrap();
    assert_eq!(footer.total_counter(), 2);
    assert_eq!(footer.control_sum(), 300);
}

#[test]
fn test_unmodified_round_trip_is_byte_identical() {
    let temp = write_ledger(
        Footer::new(3, 9300).unwrap(),
        &[
            transaction(1, 8000),
            transaction(2, 1500),
            transaction(3, -200),
        ],
    );
    let before = std::fs::read(temp.path()).unwrap();

    let mut file = LedgerFile::open(temp.path()).unwrap();
    let store = file.load().unwrap();
    file.persist(&store).unwrap();
    drop(file);

    assert_eq!(std::fs::read(temp.path()).unwrap(), before);
}

#[test]
fn test_append_to_existing_ledger() {
    let temp = write_ledger(
        Footer::new(2, 300).unwrap(),
        &[transaction(1, 100), transaction(2, 200)],
    );

    {
        let mut file = LedgerFile::open(temp.path()).unwrap();
        let mut store = file.load().unwrap();
        let counter = store
            .append_transaction(Transaction::unassigned(8000, "PLN").unwrap())
            .unwrap();
        assert_eq!(counter.get(), 3);
        file.persist(&store).unwrap();
    }

    let mut file = LedgerFile::open_read_only(temp.path()).unwrap();
    let store = file.load().unwrap();
    assert_eq!(store.len(), 3);
    assert!(store.verify_footer().is_ok());
    assert_eq!(
        store.stored_footer().copied(),
        Some(Footer::new(3, 8300).unwrap())
    );

    let amounts: Vec<i64> = store.transactions().map(Transaction::amount).collect();
    assert_eq!(amounts, vec![100, 200, 8000]);
}

#[test]
fn test_repeated_sessions_accumulate() {
    let temp = NamedTempFile::new().unwrap();
    LedgerFile::create(temp.path(), &header()).unwrap();

    for amount in [10, 20, 30] {
        let mut file = LedgerFile::open(temp.path()).unwrap();
        let mut store = file.load().unwrap();
        store
            .append_transaction(Transaction::unassigned(amount, "EUR").unwrap())
            .unwrap();
        file.persist(&store).unwrap();
    }

    let mut file = LedgerFile::open(temp.path()).unwrap();
    let store = file.load().unwrap();
    let footer = store.derive_footer().unwrap();
    assert_eq!(footer.total_counter(), 3);
    assert_eq!(footer.control_sum(), 60);
    assert_eq!(std::fs::metadata(temp.path()).unwrap().len(), 5 * 121);
}

#[test]
fn test_explicit_counter_collision_on_disk() {
    let temp = NamedTempFile::new().unwrap();
    let mut file = LedgerFile::create(temp.path(), &header()).unwrap();
    let mut store = file.load().unwrap();

    store.append_transaction(transaction(5, 100)).unwrap();
    store.append_transaction(transaction(5, 700)).unwrap();
    file.persist(&store).unwrap();

    let store = file.load().unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(Counter::new(5).unwrap()).unwrap().amount(), 700);
}

#[test]
fn test_corrupted_transaction_line() {
    let temp = write_ledger(
        Footer::new(2, 300).unwrap(),
        &[transaction(1, 100), transaction(2, 200)],
    );

    // Overwrite the amount column of line 3 with letters
    {
        let mut raw = std::fs::OpenOptions::new()
            .write(true)
            .open(temp.path())
            .unwrap();
        raw.seek(SeekFrom::Start(2 * 121 + 8)).unwrap();
        raw.write_all(b"XXXX").unwrap();
    }

    let mut file = LedgerFile::open(temp.path()).unwrap();
    match file.load() {
        Err(LedgerError::MalformedRecord { record, reason }) => {
            assert_eq!(record, RecordKind::Transaction);
            assert!(reason.starts_with("line 3:"), "{reason}");
        }
        other => panic!("expected MalformedRecord, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_truncated_file() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), format!("{}\n", header().format().unwrap())).unwrap();

    let mut file = LedgerFile::open(temp.path()).unwrap();
    assert!(matches!(
        file.load(),
        Err(LedgerError::TruncatedInput { lines: 1 })
    ));
}

#[test]
fn test_capacity_limit_survives_persist() {
    let temp = NamedTempFile::new().unwrap();
    let mut file = LedgerFile::create(temp.path(), &header()).unwrap();
    let mut store = file.load().unwrap();

    for _ in 0..MAX_TRANSACTIONS {
        store
            .append_transaction(Transaction::unassigned(1, "PLN").unwrap())
            .unwrap();
    }
    file.persist(&store).unwrap();

    let mut store = file.load().unwrap();
    assert_eq!(store.len(), MAX_TRANSACTIONS as usize);
    assert!(matches!(
        store.append_transaction(Transaction::unassigned(1, "PLN").unwrap()),
        Err(LedgerError::CapacityExceeded { .. })
    ));
    assert_eq!(store.len(), MAX_TRANSACTIONS as usize);
}
