//! Binary resolution.
//!
//! For each module, ask the module system for its PATH prepends, list the
//! executables in each directory and append one [`Contribution`] per
//! directory. The inventory is threaded through by value: each call takes
//! the accumulator and hands it back with the new contributions appended.
//!
//! Query failures and unlistable directories are logged and skipped. They
//! never abort the run.

use crate::model::{Contribution, Inventory, ModuleId};
use crate::query::ModuleQuery;
use crate::scanner::scan_executables;

/// What happened to a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// The query answered; `contributed` directories were listed and
    /// `unavailable` could not be.
    Resolved { contributed: usize, unavailable: usize },
    /// The query failed; nothing was recorded for the module.
    Skipped,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub modules: usize,
    pub skipped_modules: usize,
    pub contributions: usize,
    pub unavailable_dirs: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: ModuleOutcome) {
        self.modules += 1;
        match outcome {
            ModuleOutcome::Resolved {
                contributed,
                unavailable,
            } => {
                self.contributions += contributed;
                self.unavailable_dirs += unavailable;
            }
            ModuleOutcome::Skipped => self.skipped_modules += 1,
        }
    }
}

/// Resolves one module and returns the inventory with its contributions appended.
pub fn resolve<Q: ModuleQuery + ?Sized>(
    module: &ModuleId,
    query: &Q,
    sort: bool,
    mut inventory: Inventory,
) -> (Inventory, ModuleOutcome) {
    let dirs = match query.exported_path_dirs(module) {
        Ok(dirs) => dirs,
        Err(e) => {
            tracing::warn!(module = %module, query = query.name(), error = %e, "skipping module");
            return (inventory, ModuleOutcome::Skipped);
        }
    };

    tracing::debug!(module = %module, dirs = dirs.len(), "resolved PATH prepends");

    let mut contributed = 0;
    let mut unavailable = 0;

    for dir in dirs {
        match scan_executables(&dir, sort) {
            Ok(binaries) => {
                inventory.append(Contribution::new(module.clone(), dir, binaries));
                contributed += 1;
            }
            Err(e) => {
                tracing::warn!(module = %module, error = %e, "skipping exported directory");
                unavailable += 1;
            }
        }
    }

    (
        inventory,
        ModuleOutcome::Resolved {
            contributed,
            unavailable,
        },
    )
}

/// Resolves every module in turn, starting from an empty inventory.
///
/// `on_module` is called before each module is resolved.
pub fn build_inventory<Q, I, F>(modules: I, query: &Q, sort: bool, mut on_module: F) -> (Inventory, RunStats)
where
    Q: ModuleQuery + ?Sized,
    I: IntoIterator<Item = ModuleId>,
    F: FnMut(&ModuleId),
{
    let mut stats = RunStats::default();
    let inventory = modules
        .into_iter()
        .fold(Inventory::new(), |inventory, module| {
            on_module(&module);
            let (inventory, outcome) = resolve(&module, query, sort, inventory);
            stats.record(outcome);
            inventory
        });

    (inventory, stats)
}
