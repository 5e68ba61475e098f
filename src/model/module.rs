use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// Identifier of a module, e.g. `Foo/1.2.3`.
///
/// Built from a module file's path relative to the modules root, with
/// components always joined by `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds an identifier from a path relative to the modules root.
    ///
    /// Returns `None` for paths with no normal components or with a
    /// component that is not valid UTF-8, since such a name could not be
    /// passed back to the module system unchanged.
    pub fn from_relative_path(path: &Path) -> Option<Self> {
        let segments: Vec<&str> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_str()),
                _ => None,
            })
            .collect::<Option<_>>()?;

        if segments.is_empty() {
            None
        } else {
            Some(Self(segments.join("/")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The application this module belongs to (first path segment).
    pub fn app_name(&self) -> &str {
        app_name(&self.0)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns the first `/`-separated segment of a module identifier.
pub fn app_name(module_id: &str) -> &str {
    module_id.split('/').next().unwrap_or(module_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_name() {
        assert_eq!(app_name("Foo/1.0"), "Foo");
        assert_eq!(app_name("GCC/12.3.0-foss"), "GCC");
        assert_eq!(app_name("Nested/sub/2.0"), "Nested");
        assert_eq!(app_name("Standalone"), "Standalone");
    }

    #[test]
    fn test_from_relative_path() {
        let id = ModuleId::from_relative_path(&PathBuf::from("Foo").join("1.0")).unwrap();
        assert_eq!(id.as_str(), "Foo/1.0");
        assert_eq!(id.app_name(), "Foo");

        let id = ModuleId::from_relative_path(Path::new("./Bar/2.0.lua")).unwrap();
        assert_eq!(id.as_str(), "Bar/2.0.lua");

        assert!(ModuleId::from_relative_path(Path::new("")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"Foo/1.0-\xff"));
        assert!(ModuleId::from_relative_path(path).is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = ModuleId::new("Foo/1.0");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Foo/1.0\"");
    }
}
