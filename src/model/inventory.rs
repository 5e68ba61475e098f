use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use super::ModuleId;

/// Binaries found directly inside one exported directory of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub module: ModuleId,
    pub path: PathBuf,
    pub binaries: Vec<String>,
}

impl Contribution {
    pub fn new(module: ModuleId, path: impl Into<PathBuf>, binaries: Vec<String>) -> Self {
        Self {
            module,
            path: path.into(),
            binaries,
        }
    }

    pub fn app_name(&self) -> &str {
        self.module.app_name()
    }
}

/// All contributions recorded for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,
    pub contributions: Vec<Contribution>,
}

/// Append-only mapping from application name to contributions.
///
/// Applications keep the order in which they were first observed and each
/// application's contributions keep their append order. Contributions are
/// never merged, so two versions exposing the same binary both appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    apps: Vec<AppEntry>,
    index: HashMap<String, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contribution under the application derived from its module.
    pub fn append(&mut self, contribution: Contribution) {
        let name = contribution.app_name().to_string();
        let slot = match self.index.get(&name) {
            Some(&i) => i,
            None => {
                self.apps.push(AppEntry {
                    name: name.clone(),
                    contributions: Vec::new(),
                });
                self.index.insert(name, self.apps.len() - 1);
                self.apps.len() - 1
            }
        };
        self.apps[slot].contributions.push(contribution);
    }

    /// Applications in first-observed order.
    pub fn apps(&self) -> impl Iterator<Item = &AppEntry> {
        self.apps.iter()
    }

    pub fn get(&self, app: &str) -> Option<&AppEntry> {
        self.index.get(app).map(|&i| &self.apps[i])
    }

    /// Every contribution, grouped by application in first-observed order.
    pub fn contributions(&self) -> impl Iterator<Item = &Contribution> {
        self.apps.iter().flat_map(|a| a.contributions.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn binary_count(&self) -> usize {
        self.contributions().map(|c| c.binaries.len()).sum()
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.apps.len()))?;
        for app in &self.apps {
            map.serialize_entry(&app.name, &app.contributions)?;
        }
        map.end()
    }
}
