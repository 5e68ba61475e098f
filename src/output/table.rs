use crate::model::Inventory;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ContributionRow {
    #[tabled(rename = "Application")]
    app: String,
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Binaries")]
    binaries: String,
}

pub fn generate_table_string(inventory: &Inventory) -> String {
    if inventory.is_empty() {
        return "No binaries found.\n".to_string();
    }

    let rows: Vec<ContributionRow> = inventory
        .contributions()
        .map(|c| ContributionRow {
            app: c.app_name().to_string(),
            module: c.module.to_string(),
            directory: c.path.display().to_string(),
            binaries: if c.binaries.is_empty() {
                "-".to_string()
            } else {
                c.binaries.join(" ")
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!(
        "{}\n\n{} applications, {} contributions, {} binaries\n",
        table,
        inventory.apps().count(),
        inventory.contributions().count(),
        inventory.binary_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contribution, ModuleId};

    #[test]
    fn test_table_rows() {
        let mut inventory = Inventory::new();
        inventory.append(Contribution::new(
            ModuleId::new("Foo/1.0"),
            "/opt/sw/Foo/1.0/bin",
            vec!["foo".to_string(), "foo-helper".to_string()],
        ));
        inventory.append(Contribution::new(
            ModuleId::new("Foo/1.0"),
            "/opt/sw/Foo/1.0/libexec",
            vec![],
        ));

        let text = generate_table_string(&inventory);
        assert!(text.contains("Application"));
        assert!(text.contains("foo foo-helper"));
        assert!(text.contains("/opt/sw/Foo/1.0/libexec"));
        assert!(text.ends_with("1 applications, 2 contributions, 2 binaries\n"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(generate_table_string(&Inventory::new()), "No binaries found.\n");
    }
}
