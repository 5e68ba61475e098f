mod json;
mod map;
mod table;

pub use json::generate_json_string;
pub use map::generate_map_string;
pub use table::generate_table_string;

use crate::model::Inventory;
use anyhow::Result;

/// Output format for the rendered inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `"App": [binaries]` entry per module directory
    Map,
    /// JSON grouped by application, with module and directory per entry
    Json,
    /// Human-readable table
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "map" => Ok(OutputFormat::Map),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!(
                "Unknown format: {}. Use 'map', 'json', or 'table'",
                s
            )),
        }
    }
}

/// Renders the inventory as a single document.
pub fn format_inventory(inventory: &Inventory, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Map => generate_map_string(inventory),
        OutputFormat::Json => generate_json_string(inventory),
        OutputFormat::Table => Ok(generate_table_string(inventory)),
    }
}
