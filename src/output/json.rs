use crate::model::Inventory;
use anyhow::Result;

/// Renders the inventory grouped by application, keeping each
/// contribution's module and directory alongside its binaries.
pub fn generate_json_string(inventory: &Inventory) -> Result<String> {
    let mut json = serde_json::to_string_pretty(inventory)?;
    json.push('\n');
    Ok(json)
}
