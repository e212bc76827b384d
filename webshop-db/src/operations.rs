//! Batch reconciliation and single-row write operations.
//!
//! The reconciler inspects each record's change state and applies a fixed
//! parameterized template per row that needs one: INSERT for `Added` (the
//! server-assigned id is written back into the record), UPDATE for
//! `Modified` (full-column replace keyed by id). `Unchanged` and `Deleted`
//! records are skipped; deletion is a separate single-row operation. The
//! first failing statement aborts the remaining rows.

use log::debug;
use rusqlite::{params, Connection};
use thiserror::Error;
use webshop_catalog::{CatalogBrand, CatalogItem, CatalogType, Record, RecordState};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const CREATE_ITEM: &str = "INSERT INTO catalog_items (name, description, price, \
     catalog_type_id, catalog_brand_id, picture_file_name) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_ITEM: &str = "UPDATE catalog_items SET name = ?2, description = ?3, price = ?4, \
     catalog_type_id = ?5, catalog_brand_id = ?6, picture_file_name = ?7 WHERE id = ?1";
const DELETE_ITEM: &str = "DELETE FROM catalog_items WHERE id = ?1";
const CREATE_TYPE: &str = "INSERT INTO catalog_types (id, type) VALUES (?1, ?2)";
const CREATE_BRAND: &str = "INSERT INTO catalog_brands (id, brand) VALUES (?1, ?2)";
const CREATE_IMAGE: &str =
    "INSERT INTO catalog_images (id, image_type, image_bytes) VALUES (?1, ?2, ?3)";

/// Insert every `Added` item record.
///
/// The store-assigned id is written back into the record and the record is
/// marked applied. Returns the total number of affected rows.
pub fn create_items(
    conn: &Connection,
    records: &mut [Record<CatalogItem>],
) -> Result<usize, OperationError> {
    let mut stmt = conn.prepare(CREATE_ITEM)?;
    let mut affected = 0;
    for record in records
        .iter_mut()
        .filter(|r| r.state == RecordState::Added)
    {
        let item = &record.data;
        affected += stmt.execute(params![
            item.name,
            item.description,
            item.price.to_string(),
            item.catalog_type_id,
            item.catalog_brand_id,
            item.picture_file_name,
        ])?;
        record.data.id = conn.last_insert_rowid();
        record.accept();
    }
    debug!("inserted {affected} catalog items");
    Ok(affected)
}

/// Rewrite every `Modified` item record in full, keyed by id.
pub fn update_items(
    conn: &Connection,
    records: &mut [Record<CatalogItem>],
) -> Result<usize, OperationError> {
    let mut stmt = conn.prepare(UPDATE_ITEM)?;
    let mut affected = 0;
    for record in records
        .iter_mut()
        .filter(|r| r.state == RecordState::Modified)
    {
        let item = &record.data;
        affected += stmt.execute(params![
            item.id,
            item.name,
            item.description,
            item.price.to_string(),
            item.catalog_type_id,
            item.catalog_brand_id,
            item.picture_file_name,
        ])?;
        record.accept();
    }
    debug!("updated {affected} catalog items");
    Ok(affected)
}

/// Apply a whole record set of items: an insert pass for `Added` records
/// followed by an update pass for `Modified` ones. Returns the combined
/// affected-row count.
pub fn apply_items(
    conn: &Connection,
    records: &mut [Record<CatalogItem>],
) -> Result<usize, OperationError> {
    let inserted = create_items(conn, records)?;
    let updated = update_items(conn, records)?;
    Ok(inserted + updated)
}

/// Insert every `Added` type record. Types carry caller-assigned ids.
pub fn create_types(
    conn: &Connection,
    records: &mut [Record<CatalogType>],
) -> Result<usize, OperationError> {
    let mut stmt = conn.prepare(CREATE_TYPE)?;
    let mut affected = 0;
    for record in records
        .iter_mut()
        .filter(|r| r.state == RecordState::Added)
    {
        affected += stmt.execute(params![record.data.id, record.data.type_name])?;
        record.accept();
    }
    Ok(affected)
}

/// Insert every `Added` brand record. Brands carry caller-assigned ids.
pub fn create_brands(
    conn: &Connection,
    records: &mut [Record<CatalogBrand>],
) -> Result<usize, OperationError> {
    let mut stmt = conn.prepare(CREATE_BRAND)?;
    let mut affected = 0;
    for record in records
        .iter_mut()
        .filter(|r| r.state == RecordState::Added)
    {
        affected += stmt.execute(params![record.data.id, record.data.brand])?;
        record.accept();
    }
    Ok(affected)
}

/// Delete a single item by id. Returns the affected-row count (0 if the id
/// did not exist).
pub fn delete_item(conn: &Connection, id: i64) -> Result<usize, OperationError> {
    Ok(conn.execute(DELETE_ITEM, params![id])?)
}

/// Store the image for an item id. A second insert for the same id is a
/// constraint violation surfaced from the store.
pub fn insert_image(
    conn: &Connection,
    id: i64,
    extension: &str,
    bytes: &[u8],
) -> Result<usize, OperationError> {
    Ok(conn.execute(CREATE_IMAGE, params![id, extension, bytes])?)
}
