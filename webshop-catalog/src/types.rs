//! Entity types for the catalog schema: types, brands, items, and images.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product category. Immutable once created; no update path is exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogType {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A product brand. Same lifecycle as `CatalogType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBrand {
    pub id: i64,
    pub brand: String,
}

/// A sellable catalog item.
///
/// `id` is assigned by the store at insert time and written back into the
/// record by the reconciler; it must not be relied on before a successful
/// create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub catalog_type_id: i64,
    pub catalog_brand_id: i64,
    #[serde(default)]
    pub picture_file_name: Option<String>,
}

/// Binary image for a catalog item.
///
/// Shares the item identity space: one row per item id, created once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub id: i64,
    pub image_type: String,
    pub image_bytes: Vec<u8>,
}
