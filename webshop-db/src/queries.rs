//! Read queries and dynamic query composition for the catalog.
//!
//! `NotFound` is represented as an empty result (`None` / empty vec), never
//! as an error.

use rust_decimal::Decimal;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use webshop_catalog::{CatalogBrand, CatalogImage, CatalogItem, CatalogType};

use crate::operations::OperationError;

const QUERY_ITEMS: &str = "SELECT id, name, description, price, catalog_type_id, \
     catalog_brand_id, picture_file_name FROM catalog_items";

/// Optional filters for [`get_items`], combined conjunctively.
///
/// `None` (or an empty name string) means no constraint on that column.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub type_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub name_contains: Option<String>,
}

/// Build the filtered items SELECT plus its positional parameter bindings.
///
/// Present filters are appended as AND-joined predicates in the fixed order
/// type, brand, name. The name filter is a substring match (the bound value
/// is wrapped in `%` wildcards; SQLite LIKE is case-insensitive for ASCII).
/// Wildcard characters inside the caller string are bound as-is, not
/// escaped. Values are always bound as typed parameters, never interpolated
/// into the SQL text.
pub fn build_items_query(filter: &ItemFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut sql = QUERY_ITEMS.to_string();
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(type_id) = filter.type_id {
        values.push(Box::new(type_id));
        clauses.push(format!("catalog_type_id = ?{}", values.len()));
    }
    if let Some(brand_id) = filter.brand_id {
        values.push(Box::new(brand_id));
        clauses.push(format!("catalog_brand_id = ?{}", values.len()));
    }
    if let Some(name) = filter.name_contains.as_deref() {
        if !name.is_empty() {
            values.push(Box::new(format!("%{name}%")));
            clauses.push(format!("name LIKE ?{}", values.len()));
        }
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    (sql, values)
}

/// List all catalog types.
pub fn get_types(conn: &Connection) -> Result<Vec<CatalogType>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, type FROM catalog_types")?;
    let rows = stmt.query_map([], |row| {
        Ok(CatalogType {
            id: row.get(0)?,
            type_name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List all catalog brands.
pub fn get_brands(conn: &Connection) -> Result<Vec<CatalogBrand>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, brand FROM catalog_brands")?;
    let rows = stmt.query_map([], |row| {
        Ok(CatalogBrand {
            id: row.get(0)?,
            brand: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List catalog items matching the filter.
pub fn get_items(
    conn: &Connection,
    filter: &ItemFilter,
) -> Result<Vec<CatalogItem>, OperationError> {
    let (sql, values) = build_items_query(filter);
    let mut stmt = conn.prepare(&sql)?;
    let bindings: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(bindings.as_slice(), row_to_item)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch a single catalog item by id.
pub fn get_item_by_id(conn: &Connection, id: i64) -> Result<Option<CatalogItem>, OperationError> {
    let mut stmt = conn.prepare(&format!("{QUERY_ITEMS} WHERE id = ?1"))?;
    let result = stmt.query_row(params![id], row_to_item);
    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fetch the image stored for an item id.
pub fn get_image(conn: &Connection, id: i64) -> Result<Option<CatalogImage>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT id, image_type, image_bytes FROM catalog_images WHERE id = ?1")?;
    let result = stmt.query_row(params![id], |row| {
        Ok(CatalogImage {
            id: row.get(0)?,
            image_type: row.get(1)?,
            image_bytes: row.get(2)?,
        })
    });
    match result {
        Ok(image) => Ok(Some(image)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogItem> {
    let price: String = row.get(3)?;
    Ok(CatalogItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: parse_price(3, &price)?,
        catalog_type_id: row.get(4)?,
        catalog_brand_id: row.get(5)?,
        picture_file_name: row.get(6)?,
    })
}

/// Prices are stored as canonical decimal text; a row that fails to parse is
/// surfaced as a conversion error on the price column.
fn parse_price(index: usize, text: &str) -> rusqlite::Result<Decimal> {
    text.parse().map_err(|e: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}
