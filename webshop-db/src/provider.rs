//! Connection-per-call facade over the catalog store.
//!
//! Every method opens its own connection for the duration of the call and
//! releases it on all exit paths. No state is shared between calls;
//! consistency between concurrent callers is delegated to SQLite.

use std::path::PathBuf;

use rusqlite::Connection;
use thiserror::Error;
use webshop_catalog::{CatalogBrand, CatalogImage, CatalogItem, CatalogType, Record};

use crate::bootstrap::{self, BootstrapError, ConnectionInfo};
use crate::operations::{self, OperationError};
use crate::queries::{self, ItemFilter};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to open catalog database '{path}': {source}")]
    Connection {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Data-access facade for one catalog database.
pub struct CatalogProvider {
    info: ConnectionInfo,
}

impl CatalogProvider {
    pub fn new(info: ConnectionInfo) -> Self {
        Self { info }
    }

    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.info
    }

    fn open(&self) -> Result<Connection, ProviderError> {
        bootstrap::open_catalog(&self.info).map_err(|source| ProviderError::Connection {
            path: self.info.database_path(),
            source,
        })
    }

    /// Whether the target catalog is registered on the server.
    pub fn database_exists(&self) -> Result<bool, ProviderError> {
        Ok(bootstrap::database_exists(&self.info)?)
    }

    /// Provision the target catalog from the embedded schema script.
    pub fn create_database(&self) -> Result<(), ProviderError> {
        Ok(bootstrap::create_database(&self.info)?)
    }

    pub fn get_types(&self) -> Result<Vec<CatalogType>, ProviderError> {
        let conn = self.open()?;
        Ok(queries::get_types(&conn)?)
    }

    pub fn create_types(
        &self,
        records: &mut [Record<CatalogType>],
    ) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::create_types(&conn, records)?)
    }

    pub fn get_brands(&self) -> Result<Vec<CatalogBrand>, ProviderError> {
        let conn = self.open()?;
        Ok(queries::get_brands(&conn)?)
    }

    pub fn create_brands(
        &self,
        records: &mut [Record<CatalogBrand>],
    ) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::create_brands(&conn, records)?)
    }

    pub fn get_items(&self, filter: &ItemFilter) -> Result<Vec<CatalogItem>, ProviderError> {
        let conn = self.open()?;
        Ok(queries::get_items(&conn, filter)?)
    }

    pub fn get_item_by_id(&self, id: i64) -> Result<Option<CatalogItem>, ProviderError> {
        let conn = self.open()?;
        Ok(queries::get_item_by_id(&conn, id)?)
    }

    pub fn create_items(
        &self,
        records: &mut [Record<CatalogItem>],
    ) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::create_items(&conn, records)?)
    }

    pub fn update_items(
        &self,
        records: &mut [Record<CatalogItem>],
    ) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::update_items(&conn, records)?)
    }

    /// Insert pass plus update pass over one record set, on one connection.
    pub fn apply_items(
        &self,
        records: &mut [Record<CatalogItem>],
    ) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::apply_items(&conn, records)?)
    }

    pub fn delete_item(&self, id: i64) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::delete_item(&conn, id)?)
    }

    pub fn get_image(&self, id: i64) -> Result<Option<CatalogImage>, ProviderError> {
        let conn = self.open()?;
        Ok(queries::get_image(&conn, id)?)
    }

    pub fn insert_image(
        &self,
        id: i64,
        extension: &str,
        bytes: &[u8],
    ) -> Result<usize, ProviderError> {
        let conn = self.open()?;
        Ok(operations::insert_image(&conn, id, extension, bytes)?)
    }
}
