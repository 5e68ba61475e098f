pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod query;
pub mod resolver;
pub mod scanner;

pub use config::Config;
pub use error::{InventoryError, Result};
pub use model::{app_name, Contribution, Inventory, ModuleId};
pub use query::{LmodQuery, ModuleQuery, ScriptedQuery};
pub use resolver::{build_inventory, resolve, RunStats};
pub use scanner::ModuleEnumerator;
