//! Command implementations.
//!
//! Every command opens the service the same way: client config, resolved
//! storage paths, redb store, dataset overlay.

pub mod compose;
pub mod config;
pub mod dashboard;
pub mod import;
pub mod ingredient;
pub mod menu;
pub mod party;
pub mod premium;
pub mod prep;
pub mod rail;
pub mod recipe;
pub mod sales;
pub mod shopping;
pub mod timer;
pub mod training;

use std::path::Path;

use anyhow::Result;
use bar::BarService;
use kv::{FileLoader, OverlayKV, RedbStore};
use openbar_core::ListParams;
use tracing::debug;

use crate::config::ClientConfig;

/// Open the bar over its storage stack.
pub fn open_service(client_config_path: &Path) -> Result<BarService> {
    let config = ClientConfig::load(client_config_path)?;
    let service_config = config.service_config();

    let db_path = service_config.resolve_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = RedbStore::open(&db_path)?;
    let overlay = OverlayKV::new(db);
    let loaded = FileLoader::load(&service_config.resolve_dataset_dir(), &overlay)?;
    debug!("opened {:?} with {} dataset entries", db_path, loaded);

    Ok(BarService::open(Box::new(overlay)))
}

/// Build list parameters from the shared query flags.
pub(crate) fn list_params(
    search: Option<&str>,
    sort: Option<&str>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> ListParams {
    let mut params = ListParams::default();
    if let Some(limit) = limit {
        params.limit = limit;
    }
    if let Some(offset) = offset {
        params.offset = offset;
    }
    params.sort = sort.map(str::to_string);
    params.q = search.map(str::to_string);
    params
}
