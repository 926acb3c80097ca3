use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::KVError;
use crate::overlay::OverlayKV;
use crate::traits::KVStore;

/// FileLoader scans a dataset directory and populates the file layer of an
/// OverlayKV. Each JSON file becomes one read-only entry keyed by its stem:
///
/// ```text
/// datasets/
/// ├── recipes.json      → dataset:recipes
/// ├── ingredients.json  → dataset:ingredients
/// └── house-menu.json   → dataset:house-menu
/// ```
///
/// Dataset entries override the compiled-in defaults an operator would
/// otherwise get on first run, without ever being written back to.
pub struct FileLoader;

impl FileLoader {
    /// Load all JSON files from `dataset_dir` into the overlay's file layer.
    /// Returns the number of entries loaded. A missing directory is not an
    /// error, there is simply nothing to overlay.
    pub fn load<DB: KVStore>(
        dataset_dir: &Path,
        overlay: &OverlayKV<DB>,
    ) -> Result<usize, KVError> {
        if !dataset_dir.is_dir() {
            debug!("FileLoader: dataset dir {:?} does not exist, skipping", dataset_dir);
            return Ok(0);
        }

        let mut count = 0;
        let entries = fs::read_dir(dataset_dir).map_err(KVError::storage)?;

        for entry in entries {
            let entry = entry.map_err(KVError::storage)?;
            let path = entry.path();
            if !path.is_file() || !Self::is_json(&path) {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            if stem.is_empty() {
                warn!("FileLoader: skipping dataset file with unusable name {:?}", path);
                continue;
            }

            let data = fs::read(&path).map_err(KVError::storage)?;
            overlay.insert_file_entry(format!("dataset:{}", stem), data);
            count += 1;
        }

        debug!("FileLoader: loaded {} entries from {:?}", count, dataset_dir);
        Ok(count)
    }

    fn is_json(path: &Path) -> bool {
        matches!(path.extension().and_then(|e| e.to_str()), Some("json"))
    }
}
