use crate::error::SupplyError;
use crate::inventory::InventoryTable;
use std::env as stdenv;
use std::path::{Path, PathBuf};

/// Environment variable naming the default directory for supply databases.
pub const DATA_DIR_VAR: &str = "SUPPLY_DATA_DIR";

/// Session-level view of where supply databases live.
///
/// File names given on the command line are resolved against `data_dir`
/// unless they are absolute.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directory that relative database names are resolved against.
    pub data_dir: PathBuf,
}

impl Environment {
    /// Capture the data directory from `SUPPLY_DATA_DIR`, falling back to the
    /// current working directory.
    pub fn new() -> Self {
        let data_dir = stdenv::var_os(DATA_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| stdenv::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve a database name from a command line to a path.
    pub fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    /// Load a fresh inventory table for `source`.
    pub fn load_table(&self, source: &str) -> Result<InventoryTable, SupplyError> {
        InventoryTable::load(&self.resolve(source))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::env::Environment;
    use std::env as stdenv;
    use std::path::PathBuf;

    #[test]
    fn test_env_resolves_relative_names_against_data_dir() {
        let env = Environment::with_data_dir("/srv/supplies");
        assert_eq!(env.resolve("ward.csv"), PathBuf::from("/srv/supplies/ward.csv"));
        assert_eq!(env.resolve("a/b.csv"), PathBuf::from("/srv/supplies/a/b.csv"));
    }

    #[test]
    fn test_env_keeps_absolute_names() {
        let env = Environment::with_data_dir("/srv/supplies");
        let absolute = stdenv::temp_dir().join("ward.csv");
        assert_eq!(env.resolve(&absolute.to_string_lossy()), absolute);
    }

    #[test]
    fn test_env_new_has_a_data_dir() {
        let env = Environment::new();
        assert!(!env.data_dir.as_os_str().is_empty());
    }
}
