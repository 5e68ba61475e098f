//! Core data types for module identifiers and the binary inventory.
//!
//! - [`ModuleId`] - A module file path relative to the modules root
//! - [`Contribution`] - Binaries found in one exported directory of one module
//! - [`Inventory`] - Contributions grouped by application name
//!
//! # Example
//!
//! ```
//! use modbins::{Contribution, Inventory, ModuleId};
//!
//! let module = ModuleId::new("Foo/1.0");
//! let mut inventory = Inventory::new();
//! inventory.append(Contribution::new(module, "/opt/sw/Foo/1.0/bin", vec!["foo".into()]));
//!
//! assert_eq!(inventory.apps().count(), 1);
//! ```

mod inventory;
mod module;

pub use inventory::*;
pub use module::*;
