use std::path::PathBuf;

/// Storage location configuration shared by anything that opens the store.
///
/// The CLI builds one from its flags and the client config file, then passes
/// it to storage layer initialization.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Base data directory. Defaults for the other paths hang off this.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/data.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Directory containing read-only dataset JSON files.
    /// Defaults to `{data_dir}/datasets` if not specified.
    pub dataset_dir: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/data.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("data.redb"))
    }

    /// Resolve the dataset directory, falling back to `{data_dir}/datasets`.
    pub fn resolve_dataset_dir(&self) -> PathBuf {
        self.dataset_dir
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("datasets"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/data/data.redb"));
        assert_eq!(config.resolve_dataset_dir(), PathBuf::from("/data/datasets"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            db_path: Some(PathBuf::from("/elsewhere/bar.redb")),
            dataset_dir: Some(PathBuf::from("/elsewhere/sets")),
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/elsewhere/bar.redb"));
        assert_eq!(config.resolve_dataset_dir(), PathBuf::from("/elsewhere/sets"));
    }

    #[test]
    fn test_no_data_dir_falls_back_to_cwd() {
        let config = ServiceConfig::default();
        assert_eq!(config.resolve_db_path(), PathBuf::from("data.redb"));
    }
}
