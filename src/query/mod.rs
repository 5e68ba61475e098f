//! Module system queries.
//!
//! This module provides the [`ModuleQuery`] trait, which answers a single
//! question: which directories does a module prepend to `PATH`?
//!
//! | Implementation | Backing |
//! |----------------|---------|
//! | [`LmodQuery`] | `$LMOD_CMD <shell> show <module>` |
//! | [`ScriptedQuery`] | In-memory answers, for tests and dry runs |
//!
//! # Example
//!
//! ```
//! use modbins::{ModuleId, ModuleQuery, ScriptedQuery};
//! use std::path::PathBuf;
//!
//! let query = ScriptedQuery::new().with_dirs("Foo/1.0", ["/opt/sw/Foo/1.0/bin"]);
//! let dirs = query.exported_path_dirs(&ModuleId::new("Foo/1.0")).unwrap();
//! assert_eq!(dirs, vec![PathBuf::from("/opt/sw/Foo/1.0/bin")]);
//! ```

mod directive;
mod lmod;
mod scripted;

pub use directive::parse_path_prepends;
pub use lmod::LmodQuery;
pub use scripted::ScriptedQuery;

use crate::error::Result;
use crate::model::ModuleId;
use std::path::PathBuf;

/// Capability to ask the module system for a module's PATH prepends.
pub trait ModuleQuery {
    /// Returns a short name for log output.
    fn name(&self) -> &'static str;

    /// Returns the directories `module` prepends to `PATH`, in definition order.
    ///
    /// # Errors
    ///
    /// Returns a query error if the module system cannot answer. Callers
    /// treat this as recoverable for the single module concerned.
    fn exported_path_dirs(&self, module: &ModuleId) -> Result<Vec<PathBuf>>;
}
