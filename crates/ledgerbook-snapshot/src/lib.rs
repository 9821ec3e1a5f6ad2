//! Ledger snapshot loading
//!
//! Reads a materialized snapshot of accounts, transactions, invoices, bills
//! and tax codes from a YAML or JSON file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod error;
pub mod types;

pub use error::SnapshotError;
pub use types::{
    AccountRecord, DocumentRecord, LedgerDocument, LineRecord, TaxCodeRecord, TransactionRecord,
};

/// On-disk encoding of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Yaml,
    Json,
}

impl SnapshotFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            Some("json") => Ok(SnapshotFormat::Json),
            _ => Err(SnapshotError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Parse snapshot text in the given format
pub fn parse_document(
    content: &str,
    format: SnapshotFormat,
    location: &str,
) -> Result<LedgerDocument, SnapshotError> {
    let result = match format {
        SnapshotFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        SnapshotFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    result.map_err(|message| SnapshotError::SyntaxError {
        location: location.to_string(),
        message,
    })
}

// ==================== Source Trait ====================

/// Shared source reference
pub type SnapshotSourceRef = Arc<dyn SnapshotSource>;

/// Anything that can hand the engine a full ledger snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Load the snapshot stored at `path`
    async fn load(&self, path: PathBuf) -> Result<LedgerDocument, SnapshotError>;
}

/// Reads snapshot files from the local filesystem
#[derive(Debug, Default)]
pub struct FileSnapshotSource;

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn load(&self, path: PathBuf) -> Result<LedgerDocument, SnapshotError> {
        let format = SnapshotFormat::from_path(&path)?;
        let content = tokio::fs::read_to_string(&path).await?;
        let location = path.to_string_lossy().to_string();

        let document = parse_document(&content, format, &location)?;
        log::debug!(
            "Loaded snapshot {}: {} accounts, {} transactions, {} invoices, {} bills, {} tax codes",
            location,
            document.accounts.len(),
            document.transactions.len(),
            document.invoices.len(),
            document.bills.len(),
            document.tax_codes.len()
        );
        Ok(document)
    }
}
