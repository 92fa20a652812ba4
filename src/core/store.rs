//! SQLite-backed credential store.
//!
//! Every write is a single statement in autocommit mode, so a crash leaves the
//! row either fully written or absent. The connection is owned exclusively by
//! [`CredentialStore`].

use crate::constants;
use crate::error::{Result, VaultError};
use crate::models::record::{Record, VaultStats};
use crate::util::fs as vault_fs;
use chrono::{DateTime, Utc};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info, warn};

const SCHEMA: &str = include_str!("schema.sql");

const UNIQUE_NETWORK_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_passwords_network ON passwords(network)";
const DROP_NETWORK_INDEX: &str = "DROP INDEX IF EXISTS idx_passwords_network";

const REQUIRED_COLUMNS: &[&str] = &["id", "network", "email", "content", "saved_at"];

/// Options applied at bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    pub unique_networks: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            unique_networks: true,
        }
    }
}

/// Outcome of an update or delete that targets a single id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    Applied,
    NotFound,
}

pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open (or create) the store at `location` and bootstrap the schema.
    ///
    /// Safe to call on every startup.
    pub fn initialize(location: &Path, options: StoreOptions) -> Result<Self> {
        let existed = location.exists();
        let conn = Connection::open(location).map_err(|e| {
            VaultError::StorageUnavailable(format!("open {}: {}", location.display(), e))
        })?;
        if !existed {
            if let Err(e) = vault_fs::set_permissions(location, constants::PRIVATE_FILE_MODE) {
                warn!("cannot restrict store permissions: {:#}", e);
            }
        }
        let store = Self::bootstrap(conn, options)?;
        info!(path = %location.display(), "credential store ready");
        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn in_memory(options: StoreOptions) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| VaultError::StorageUnavailable(format!("open in-memory store: {}", e)))?;
        Self::bootstrap(conn, options)
    }

    fn bootstrap(conn: Connection, options: StoreOptions) -> Result<Self> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master \
                 WHERE type = 'table' AND name = 'passwords')",
                [],
                |row| row.get(0),
            )
            .map_err(bootstrap_error)?;

        if table_exists {
            check_columns(&conn)?;
        } else {
            debug!("passwords table missing, building schema");
        }

        conn.execute_batch(SCHEMA).map_err(bootstrap_error)?;

        let index_sql = if options.unique_networks {
            UNIQUE_NETWORK_INDEX
        } else {
            DROP_NETWORK_INDEX
        };
        conn.execute_batch(index_sql).map_err(|e| {
            if is_unique_violation(&e) {
                VaultError::StorageUnavailable(
                    "duplicate networks already stored; \
                     disable [store] unique_networks or remove the duplicates"
                        .into(),
                )
            } else {
                bootstrap_error(e)
            }
        })?;

        Ok(Self { conn })
    }

    /// Insert a new record and return its id.
    pub fn add(&self, network: &str, email: &str, content: &str) -> Result<i64> {
        let network = network.trim();
        if network.is_empty() {
            return Err(VaultError::EmptyField("network"));
        }
        self.conn
            .execute(
                "INSERT INTO passwords (network, email, content, saved_at) VALUES (?1, ?2, ?3, ?4)",
                params![network, email, content, Utc::now()],
            )
            .map_err(|e| row_error(e, network))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, network, "record inserted");
        Ok(id)
    }

    /// Delete the record with `id`. A missing id is not an error.
    pub fn remove(&self, id: i64) -> Result<RowChange> {
        let affected = self
            .conn
            .execute("DELETE FROM passwords WHERE id = ?1", params![id])
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        debug!(id, affected, "delete");
        Ok(change(affected))
    }

    /// Replace network, email and content of the record with `id`.
    pub fn update(&self, id: i64, network: &str, email: &str, content: &str) -> Result<RowChange> {
        let network = network.trim();
        if network.is_empty() {
            return Err(VaultError::EmptyField("network"));
        }
        let affected = self
            .conn
            .execute(
                "UPDATE passwords SET network = ?1, email = ?2, content = ?3 WHERE id = ?4",
                params![network, email, content, id],
            )
            .map_err(|e| row_error(e, network))?;
        debug!(id, affected, "update");
        Ok(change(affected))
    }

    pub fn get(&self, id: i64) -> Result<Option<Record>> {
        self.conn
            .query_row(
                "SELECT id, network, email, content, saved_at FROM passwords WHERE id = ?1",
                params![id],
                row_to_record,
            )
            .optional()
            .map_err(|e| VaultError::Storage(e.to_string()))
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, network, email, content, saved_at FROM passwords ORDER BY id")
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_record)
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| VaultError::Storage(e.to_string()))
    }

    pub fn stats(&self) -> Result<VaultStats> {
        self.conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT network), MIN(saved_at), MAX(saved_at) \
                 FROM passwords",
                [],
                |row| {
                    Ok(VaultStats {
                        records: row.get(0)?,
                        distinct_networks: row.get(1)?,
                        oldest: row.get::<_, Option<DateTime<Utc>>>(2)?,
                        newest: row.get::<_, Option<DateTime<Utc>>>(3)?,
                    })
                },
            )
            .map_err(|e| VaultError::Storage(e.to_string()))
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        network: row.get(1)?,
        email: row.get(2)?,
        content: row.get(3)?,
        saved_at: row.get(4)?,
    })
}

fn check_columns(conn: &Connection) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info('passwords')")
        .map_err(bootstrap_error)?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(bootstrap_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(bootstrap_error)?;

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !columns.iter().any(|have| have == c))
        .collect();
    if !missing.is_empty() {
        return Err(VaultError::StorageUnavailable(format!(
            "existing passwords table uses an older layout (missing columns: {})",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn change(affected: usize) -> RowChange {
    if affected == 0 {
        RowChange::NotFound
    } else {
        RowChange::Applied
    }
}

/// Only UNIQUE violations count; CHECK and NOT NULL failures are plain storage errors.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn row_error(err: rusqlite::Error, network: &str) -> VaultError {
    if is_unique_violation(&err) {
        VaultError::DuplicateKey(network.to_string())
    } else {
        VaultError::Storage(err.to_string())
    }
}

fn bootstrap_error(err: rusqlite::Error) -> VaultError {
    VaultError::StorageUnavailable(format!("bootstrap schema: {}", err))
}
