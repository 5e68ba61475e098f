use crate::model::Inventory;
use anyhow::Result;

const INDENT: &str = "    ";

/// Renders one `"App": ["bin", ...]` entry per contribution inside a single
/// braced document.
///
/// An application with several contributions repeats its key, once per
/// module directory, in observation order.
pub fn generate_map_string(inventory: &Inventory) -> Result<String> {
    let mut entries = Vec::new();

    for app in inventory.apps() {
        let key = serde_json::to_string(&app.name)?;
        for contribution in &app.contributions {
            let binaries = contribution
                .binaries
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(format!("{}{}: [{}]", INDENT, key, binaries.join(", ")));
        }
    }

    if entries.is_empty() {
        return Ok("{}\n".to_string());
    }

    Ok(format!("{{\n{}\n}}\n", entries.join(",\n")))
}
