//! Disk I/O for ledger files

use crate::core::error::Result;
use crate::core::header::Header;
use crate::core::store::LedgerStore;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Disk-backed ledger file
///
/// The handle is held from load until persist and closed on drop.
pub struct LedgerFile {
    file: File,
    path: PathBuf,
}

impl LedgerFile {
    /// Create a new ledger file holding `header` and an empty footer
    ///
    /// An existing file at `path` is truncated.
    pub fn create<P: AsRef<Path>>(path: P, header: &Header) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        let mut ledger_file = LedgerFile {
            file,
            path: path.as_ref().to_path_buf(),
        };
        ledger_file.persist(&LedgerStore::new(header.clone()))?;

        info!(path = %ledger_file.path.display(), "Created ledger file");
        Ok(ledger_file)
    }

    /// Open an existing ledger file for reading and writing
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;

        Ok(LedgerFile {
            file,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Open an existing ledger file without write access
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).open(&path)?;

        Ok(LedgerFile {
            file,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Read the whole ledger from the start of the file
    pub fn load(&mut self) -> Result<LedgerStore> {
        self.file.seek(SeekFrom::Start(0))?;
        LedgerStore::load(BufReader::new(&mut self.file))
    }

    /// Overwrite the file with `store`
    ///
    /// The file is cut to the written length so no bytes from a longer
    /// previous image remain. Not atomic: a failure mid-write leaves the
    /// file partially written.
    pub fn persist(&mut self, store: &LedgerStore) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        {
            let mut writer = BufWriter::new(&mut self.file);
            store.persist(&mut writer)?;
        }

        let written = self.file.stream_position()?;
        self.file.set_len(written)?;
        self.file.flush()?;
        self.file.sync_all()?;

        info!(
            path = %self.path.display(),
            transactions = store.len(),
            bytes = written,
            "Persisted ledger file"
        );
        Ok(())
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
