//! Error types for ledgerbook-snapshot

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Syntax error in {location}: {message}")]
    SyntaxError { location: String, message: String },

    #[error("Unsupported snapshot format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}
