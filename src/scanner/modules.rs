use crate::error::{InventoryError, Result};
use crate::model::ModuleId;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazily yields one [`ModuleId`] per module file under a modules root.
///
/// Traversal follows filesystem order unless sorting is requested. Entries
/// that fail mid-walk (vanished files, unreadable subdirectories) are logged
/// and skipped; only an unusable root is an error.
pub struct ModuleEnumerator {
    root: PathBuf,
    walker: walkdir::FilterEntry<walkdir::IntoIter, fn(&walkdir::DirEntry) -> bool>,
}

impl ModuleEnumerator {
    /// Opens `root` for enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Enumeration`] if `root` does not exist, is
    /// not a directory, or cannot be read.
    pub fn new(root: impl Into<PathBuf>, sort: bool, skip_hidden: bool) -> Result<Self> {
        let root = root.into();

        // Probe readability up front so a bad root fails before any output.
        fs::read_dir(&root).map_err(|source| InventoryError::Enumeration {
            root: root.clone(),
            source,
        })?;

        let mut walk = WalkDir::new(&root).follow_links(true).min_depth(1);
        if sort {
            walk = walk.sort_by_file_name();
        }

        let filter: fn(&walkdir::DirEntry) -> bool = if skip_hidden {
            is_visible
        } else {
            keep_all
        };

        Ok(Self {
            walker: walk.into_iter().filter_entry(filter),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for ModuleEnumerator {
    type Item = ModuleId;

    fn next(&mut self) -> Option<ModuleId> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry under modules root");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };

            match ModuleId::from_relative_path(relative) {
                Some(id) => return Some(id),
                None => {
                    tracing::warn!(path = %entry.path().display(), "skipping module file with non-UTF-8 name");
                }
            }
        }
    }
}

fn keep_all(_: &walkdir::DirEntry) -> bool {
    true
}

/// Lmod treats dot-prefixed module files and directories as hidden.
fn is_visible(entry: &walkdir::DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
}
