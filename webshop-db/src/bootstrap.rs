//! Database existence checks and provisioning from the embedded schema
//! script.
//!
//! A SQLite "server" here is a directory of database files. The
//! administrative catalog (`master.db`) carries a registry of provisioned
//! databases, standing in for a server-level catalog view. Provisioning runs
//! the embedded script against a server-level connection: the script
//! ATTACHes the target file (creating it), builds the catalog tables inside
//! it, and registers the database.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::script::split_batches;

/// Name of the administrative catalog used for server-level work.
pub const MASTER_CATALOG: &str = "master";

/// Placeholder token in the embedded script, replaced with the target
/// database path.
const DATABASE_NAME_TOKEN: &str = "[DATABASE_NAME]";

/// Embedded schema script for provisioning a new catalog database.
const CREATE_DB_SQL: &str = include_str!("../assets/create_db.sql");

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid catalog configuration: {0}")]
    Configuration(String),
}

/// Where a catalog database lives: a data directory plus a catalog name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    data_dir: PathBuf,
    catalog: String,
}

impl ConnectionInfo {
    pub fn new(data_dir: impl Into<PathBuf>, catalog: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog: catalog.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Equivalent descriptor pointing at the administrative catalog. Only
    /// the catalog name differs.
    pub fn master(&self) -> Self {
        Self {
            data_dir: self.data_dir.clone(),
            catalog: MASTER_CATALOG.to_string(),
        }
    }

    /// File path of this catalog's database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.catalog))
    }
}

/// Check whether the target catalog is registered on the server.
///
/// Opens a server-level connection and counts registry rows for the target;
/// true iff exactly one matches. Does not touch the target database itself.
pub fn database_exists(info: &ConnectionInfo) -> Result<bool, BootstrapError> {
    let conn = open_master(info)?;
    let name = info.database_path().display().to_string();
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM databases WHERE name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count == 1)
}

/// Provision the target catalog database from the embedded schema script.
///
/// Validates the catalog name, substitutes the script placeholder with the
/// target path, and executes each batch in order against a server-level
/// connection. A failing batch aborts the remainder; there is no cross-batch
/// rollback. Not safe to run concurrently with itself for the same target.
pub fn create_database(info: &ConnectionInfo) -> Result<(), BootstrapError> {
    let catalog = info.catalog();
    if catalog.is_empty() {
        return Err(BootstrapError::Configuration(
            "catalog name must not be empty".to_string(),
        ));
    }
    if catalog.eq_ignore_ascii_case(MASTER_CATALOG) {
        return Err(BootstrapError::Configuration(format!(
            "catalog name must not be the administrative catalog '{MASTER_CATALOG}'"
        )));
    }

    let conn = open_master(info)?;
    let target = info.database_path().display().to_string();
    let script = CREATE_DB_SQL.replace(DATABASE_NAME_TOKEN, &target);
    for (index, batch) in split_batches(&script).enumerate() {
        debug!("executing schema batch {index}");
        conn.execute_batch(&batch)?;
    }
    info!("created catalog database '{catalog}' at {target}");
    Ok(())
}

/// Open a connection to an existing catalog database.
///
/// Fails if the database file does not exist; use [`create_database`] to
/// provision it first.
pub fn open_catalog(info: &ConnectionInfo) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        info.database_path(),
        OpenFlags::SQLITE_OPEN_READ_WRITE,
    )?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an in-memory database with the full catalog schema applied from the
/// embedded script. Useful for testing.
pub fn open_memory() -> Result<Connection, BootstrapError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    ensure_registry(&conn)?;
    let script = CREATE_DB_SQL.replace(DATABASE_NAME_TOKEN, ":memory:");
    for batch in split_batches(&script) {
        conn.execute_batch(&batch)?;
    }
    Ok(conn)
}

/// Open a server-level connection (the administrative catalog), ensuring the
/// database registry table exists.
fn open_master(info: &ConnectionInfo) -> Result<Connection, BootstrapError> {
    let conn = Connection::open(info.master().database_path())?;
    ensure_registry(&conn)?;
    Ok(conn)
}

fn ensure_registry(conn: &Connection) -> Result<(), BootstrapError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS databases (
            name TEXT PRIMARY KEY,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;
    Ok(())
}
