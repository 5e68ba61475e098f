//! Error types for inventory construction.
//!
//! Only [`InventoryError::Enumeration`] and [`InventoryError::Config`] abort a
//! run. Every other variant describes a failure scoped to one module or one
//! directory, which the resolver logs and skips.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building an inventory.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The modules root is missing or unreadable.
    #[error("cannot enumerate modules under {}: {source}", .root.display())]
    Enumeration {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The module command could not be started.
    #[error("failed to run module command {command:?}: {source}")]
    QuerySpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The module command did not finish in time and was killed.
    #[error("module query for {module} timed out after {}s", .timeout.as_secs())]
    QueryTimeout { module: String, timeout: Duration },

    /// The module command exited unsuccessfully.
    #[error("module query for {module} exited with status {status}")]
    QueryExit { module: String, status: String },

    /// Output of the module command could not be collected.
    #[error("failed to read module query output for {module}: {source}")]
    QueryIo {
        module: String,
        #[source]
        source: std::io::Error,
    },

    /// An exported directory could not be listed.
    #[error("cannot list {}: {source}", .dir.display())]
    PathUnavailable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is missing or malformed.
    #[error("invalid configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl InventoryError {
    /// Returns true if this error must terminate the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            InventoryError::Enumeration { .. } | InventoryError::Config { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
