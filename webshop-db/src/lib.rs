//! SQLite persistence layer for the webshop product catalog.
//!
//! Provides database bootstrap from an embedded schema script, filtered
//! catalog queries, and batch reconciliation of change-tracked records,
//! backed by SQLite (via rusqlite with bundled feature).

pub mod bootstrap;
pub mod operations;
pub mod provider;
pub mod queries;
pub mod script;

pub use bootstrap::{
    create_database, database_exists, open_catalog, open_memory, BootstrapError, ConnectionInfo,
    MASTER_CATALOG,
};
pub use operations::{
    apply_items, create_brands, create_items, create_types, delete_item, insert_image,
    update_items, OperationError,
};
pub use provider::{CatalogProvider, ProviderError};
pub use queries::{
    build_items_query, get_brands, get_image, get_item_by_id, get_items, get_types, ItemFilter,
};
pub use script::{split_batches, BATCH_SEPARATOR};
