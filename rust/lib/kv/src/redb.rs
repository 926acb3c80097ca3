use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// RedbStore is a KVStore implementation backed by redb — a pure-Rust embedded
/// key-value database. All keys are read-write (not read-only).
///
/// Every mutating call runs inside one write transaction, so `batch_set` and
/// `batch_delete` are the atomic unit callers use for multi-key saves.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(KVError::storage)?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db.begin_write().map_err(KVError::storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = read_txn.open_table(TABLE).map_err(KVError::storage)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(KVError::storage(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::storage)?;
            table.insert(key, value).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::storage)?;
            table.remove(key).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::storage)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(KVError::storage)?;
            }
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::storage)?;
            for key in keys {
                table.remove(*key).map_err(KVError::storage)?;
            }
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = read_txn.open_table(TABLE).map_err(KVError::storage)?;

        let mut results = Vec::new();
        let iter = table.range(prefix..).map_err(KVError::storage)?;

        for entry in iter {
            let entry = entry.map_err(KVError::storage)?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            let value = entry.1.value().to_vec();
            results.push((key, value));
        }

        Ok(results)
    }

    fn is_readonly(&self, _key: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, RedbStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn set_get_delete() {
        let (_dir, store) = test_store();

        assert!(store.get("state:recipes").unwrap().is_none());
        store.set("state:recipes", b"[]").unwrap();
        assert_eq!(store.get("state:recipes").unwrap(), Some(b"[]".to_vec()));

        store.delete("state:recipes").unwrap();
        assert!(store.get("state:recipes").unwrap().is_none());
    }

    #[test]
    fn scan_returns_sorted_prefix_matches() {
        let (_dir, store) = test_store();
        store.set("state:timers", b"t").unwrap();
        store.set("state:recipes", b"r").unwrap();
        store.set("dataset:recipes", b"d").unwrap();

        let results = store.scan("state:").unwrap();
        let keys: Vec<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["state:recipes", "state:timers"]);
    }

    #[test]
    fn batch_set_writes_all_entries() {
        let (_dir, store) = test_store();
        store
            .batch_set(&[
                ("state:recipes", b"[1]".as_slice()),
                ("state:sales", b"[2]".as_slice()),
                ("state:premium", b"{}".as_slice()),
            ])
            .unwrap();

        assert_eq!(store.get("state:recipes").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(store.get("state:sales").unwrap(), Some(b"[2]".to_vec()));
        assert_eq!(store.get("state:premium").unwrap(), Some(b"{}".to_vec()));

        store.batch_delete(&["state:recipes", "state:sales"]).unwrap();
        assert!(store.get("state:recipes").unwrap().is_none());
        assert!(store.get("state:premium").unwrap().is_some());
    }

    #[test]
    fn nothing_is_readonly() {
        let (_dir, store) = test_store();
        store.set("dataset:recipes", b"x").unwrap();
        assert!(!store.is_readonly("dataset:recipes"));
    }
}
