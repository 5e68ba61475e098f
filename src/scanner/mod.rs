//! Filesystem scanners.
//!
//! - [`ModuleEnumerator`] walks a modules root and yields module identifiers
//! - [`scan_executables`] lists the executables inside one directory
//!
//! # Example
//!
//! ```no_run
//! use modbins::scanner::{scan_executables, ModuleEnumerator};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     for module in ModuleEnumerator::new("/opt/sw/modules/all", true, false)? {
//!         println!("{} ({})", module, module.app_name());
//!     }
//!
//!     let bins = scan_executables(Path::new("/opt/sw/Foo/1.0/bin"), true)?;
//!     println!("{}", bins.join(" "));
//!     Ok(())
//! }
//! ```

mod binaries;
mod modules;

pub use binaries::scan_executables;
pub use modules::ModuleEnumerator;
