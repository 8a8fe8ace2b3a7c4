//! Durable key-value store backed by redb.
//!
//! Each keyspace is its own redb table. Every `put` commits its own write
//! transaction; a failed batch can leave earlier records behind, which a
//! re-ingestion overwrites.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};

use crate::error::StoreError;
use crate::store::{Keyspace, StorageAdapter, StoreResult};

const TERMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("terms");
const SYNONYMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("synonyms");

fn table_for(keyspace: Keyspace) -> TableDefinition<'static, &'static str, &'static [u8]> {
    match keyspace {
        Keyspace::Terms => TERMS_TABLE,
        Keyspace::Synonyms => SYNONYMS_TABLE,
    }
}

/// Durable store using redb.
pub struct DurableStore {
    db: Arc<Database>,
}

impl DurableStore {
    /// Open or create a durable store in the given directory.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io { source: e })?;
        let db_path = data_dir.join("vocab-graph.redb");
        let db = Database::create(&db_path).map_err(|e| StoreError::Redb {
            message: format!("failed to open redb at {}: {e}", db_path.display()),
        })?;
        tracing::debug!(path = %db_path.display(), "opened durable store");
        Ok(Self { db: Arc::new(db) })
    }
}

impl StorageAdapter for DurableStore {
    fn get(&self, keyspace: Keyspace, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(|e| StoreError::Redb {
            message: format!("begin_read failed: {e}"),
        })?;
        let table = match txn.open_table(table_for(keyspace)) {
            Ok(table) => table,
            // Nothing was ever written to this keyspace.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => {
                return Err(StoreError::Redb {
                    message: format!("open_table {keyspace} failed: {e}"),
                });
            }
        };
        let result = table.get(key).map_err(|e| StoreError::Redb {
            message: format!("get {keyspace}/{key} failed: {e}"),
        })?;
        Ok(result.map(|guard| guard.value().to_vec()))
    }

    fn put(&self, keyspace: Keyspace, key: &str, value: &[u8]) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Redb {
            message: format!("begin_write failed: {e}"),
        })?;
        {
            let mut table = txn.open_table(table_for(keyspace)).map_err(|e| StoreError::Redb {
                message: format!("open_table {keyspace} failed: {e}"),
            })?;
            table.insert(key, value).map_err(|e| StoreError::Redb {
                message: format!("insert {keyspace}/{key} failed: {e}"),
            })?;
        }
        txn.commit().map_err(|e| StoreError::Redb {
            message: format!("commit failed: {e}"),
        })?;
        Ok(())
    }
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableStore").finish()
    }
}
