use super::ModuleQuery;
use crate::error::{InventoryError, Result};
use crate::model::ModuleId;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// A [`ModuleQuery`] that replays scripted answers.
///
/// Modules with no scripted answer report no PATH prepends. Modules marked
/// with [`failing`](Self::failing) report a non-zero exit.
#[derive(Debug, Clone, Default)]
pub struct ScriptedQuery {
    answers: HashMap<String, Vec<PathBuf>>,
    failures: HashSet<String>,
}

impl ScriptedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dirs<I, P>(mut self, module: &str, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.answers
            .insert(module.to_string(), dirs.into_iter().map(Into::into).collect());
        self
    }

    pub fn failing(mut self, module: &str) -> Self {
        self.failures.insert(module.to_string());
        self
    }
}

impl ModuleQuery for ScriptedQuery {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn exported_path_dirs(&self, module: &ModuleId) -> Result<Vec<PathBuf>> {
        if self.failures.contains(module.as_str()) {
            return Err(InventoryError::QueryExit {
                module: module.to_string(),
                status: "exit status: 1".to_string(),
            });
        }

        Ok(self.answers.get(module.as_str()).cloned().unwrap_or_default())
    }
}
