//! # JSON File Ledger
//!
//! File-backed ledger shared between terminals. Every call re-reads the
//! file so releases written elsewhere are seen on the next lookup. Writes
//! go to a temporary file in the same directory and are renamed over the
//! original.
//!
//! Read-modify-write cycles hold an exclusive `fs2` lock on a sidecar
//! `<ledger>.lock` file, so desks in other processes cannot interleave
//! and drop each other's releases.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use fs2::FileExt;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::document::LedgerDocument;
use crate::domain::{AllotmentId, AllotmentRef, BeneficiaryId, LedgerError, RosterEntry};
use crate::ports::{AllotmentDirectory, ReleaseLedger};

/// Ledger stored as one JSON document on disk.
#[derive(Debug)]
pub struct JsonFileLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLedger {
    /// Open an existing ledger file. The file is read lazily.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Write `document` to `path` and open it.
    pub async fn create(
        path: impl Into<PathBuf>,
        document: &LedgerDocument,
    ) -> Result<Self, LedgerError> {
        let ledger = Self::open(path);
        let bytes = serde_json::to_vec_pretty(document)?;
        ledger
            .locked(move |path| write_atomic(path, &bytes))
            .await?;
        info!(path = %ledger.path.display(), "Created ledger file");
        Ok(ledger)
    }

    /// Ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the whole document.
    pub async fn load(&self) -> Result<LedgerDocument, LedgerError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Run `op` on a blocking thread while holding the file lock.
    async fn locked<T, F>(&self, op: F) -> Result<T, LedgerError>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T, LedgerError> + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let _lock = LedgerLock::acquire(&path)?;
            op(&path)
        })
        .await
        .map_err(|e| LedgerError::Unavailable(format!("write task failed: {e}")))?
    }
}

/// Exclusive advisory lock on `<ledger>.lock`, released on drop.
struct LedgerLock {
    file: File,
}

impl LedgerLock {
    fn acquire(ledger: &Path) -> Result<Self, LedgerError> {
        let mut name = ledger.as_os_str().to_owned();
        name.push(".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(PathBuf::from(name))?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self { file })
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn read_document(path: &Path) -> Result<LedgerDocument, LedgerError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), LedgerError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| LedgerError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl ReleaseLedger for JsonFileLedger {
    async fn list_assigned(&self, allotment: AllotmentId) -> Result<Vec<RosterEntry>, LedgerError> {
        self.load().await?.roster(allotment)
    }

    async fn is_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<bool, LedgerError> {
        self.load().await?.is_released(allotment, beneficiary)
    }

    async fn mark_released(
        &self,
        allotment: AllotmentId,
        beneficiary: BeneficiaryId,
    ) -> Result<(), LedgerError> {
        let written = self
            .locked(move |path| {
                let mut document = read_document(path)?;
                let flipped = document.mark_released(allotment, beneficiary, Utc::now())?;
                if flipped {
                    write_atomic(path, &serde_json::to_vec_pretty(&document)?)?;
                }
                Ok(flipped)
            })
            .await?;
        if written {
            debug!(%allotment, %beneficiary, path = %self.path.display(), "Release written");
        }
        Ok(())
    }
}

#[async_trait]
impl AllotmentDirectory for JsonFileLedger {
    async fn list_allotments(&self) -> Result<Vec<AllotmentRef>, LedgerError> {
        Ok(self.load().await?.allotments())
    }
}
