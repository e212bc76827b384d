//! Data model types for the webshop product catalog.
//!
//! This crate defines the persistent catalog entities and the change-tracked
//! record wrapper used for batch writes, without any database dependencies.
//! Consumers can use these types directly for serialization, display, or
//! passing to `webshop-db` for persistence.

pub mod records;
pub mod types;

pub use records::{Record, RecordState};
pub use types::*;
