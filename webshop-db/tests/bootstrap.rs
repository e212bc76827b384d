use rust_decimal::Decimal;
use webshop_catalog::{CatalogBrand, CatalogItem, CatalogType, Record};
use webshop_db::{
    create_database, database_exists, open_catalog, BootstrapError, CatalogProvider,
    ConnectionInfo, ItemFilter, ProviderError, MASTER_CATALOG,
};

fn widget() -> CatalogItem {
    CatalogItem {
        id: 0,
        name: "Widget".to_string(),
        description: "d".to_string(),
        price: "9.99".parse().unwrap(),
        catalog_type_id: 1,
        catalog_brand_id: 1,
        picture_file_name: None,
    }
}

#[test]
fn fresh_catalog_does_not_exist() {
    let dir = tempfile::TempDir::new().unwrap();
    let info = ConnectionInfo::new(dir.path(), "shop");
    assert!(!database_exists(&info).unwrap());
    // Idempotent with no intervening create.
    assert!(!database_exists(&info).unwrap());
}

#[test]
fn create_then_exists() {
    let dir = tempfile::TempDir::new().unwrap();
    let info = ConnectionInfo::new(dir.path(), "shop");

    create_database(&info).unwrap();
    assert!(database_exists(&info).unwrap());
    assert!(database_exists(&info).unwrap());
    assert!(info.database_path().is_file());
}

#[test]
fn catalogs_are_tracked_per_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let first = ConnectionInfo::new(dir.path(), "shop");
    let second = ConnectionInfo::new(dir.path(), "outlet");

    create_database(&first).unwrap();
    assert!(database_exists(&first).unwrap());
    assert!(!database_exists(&second).unwrap());
}

#[test]
fn master_descriptor_substitutes_only_the_catalog() {
    let dir = tempfile::TempDir::new().unwrap();
    let info = ConnectionInfo::new(dir.path(), "shop");
    let master = info.master();
    assert_eq!(master.catalog(), MASTER_CATALOG);
    assert_eq!(master.data_dir(), info.data_dir());
}

#[test]
fn create_rejects_the_administrative_catalog() {
    let dir = tempfile::TempDir::new().unwrap();
    for name in ["master", "Master", "MASTER"] {
        let info = ConnectionInfo::new(dir.path(), name);
        let result = create_database(&info);
        assert!(matches!(result, Err(BootstrapError::Configuration(_))));
    }
}

#[test]
fn create_rejects_an_empty_catalog_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let info = ConnectionInfo::new(dir.path(), "");
    let result = create_database(&info);
    assert!(matches!(result, Err(BootstrapError::Configuration(_))));
}

#[test]
fn created_catalog_has_all_tables() {
    let dir = tempfile::TempDir::new().unwrap();
    let info = ConnectionInfo::new(dir.path(), "shop");
    create_database(&info).unwrap();

    let conn = open_catalog(&info).unwrap();
    for table in [
        "catalog_types",
        "catalog_brands",
        "catalog_items",
        "catalog_images",
    ] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn open_catalog_fails_for_missing_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let info = ConnectionInfo::new(dir.path(), "shop");
    assert!(open_catalog(&info).is_err());
}

#[test]
fn provider_surfaces_connection_failures() {
    let dir = tempfile::TempDir::new().unwrap();
    let provider = CatalogProvider::new(ConnectionInfo::new(dir.path(), "shop"));
    let result = provider.get_types();
    assert!(matches!(result, Err(ProviderError::Connection { .. })));
}

#[test]
fn end_to_end_item_lifecycle() {
    let dir = tempfile::TempDir::new().unwrap();
    let provider = CatalogProvider::new(ConnectionInfo::new(dir.path(), "shop"));

    assert!(!provider.database_exists().unwrap());
    provider.create_database().unwrap();
    assert!(provider.database_exists().unwrap());

    let mut types = vec![Record::added(CatalogType {
        id: 1,
        type_name: "Mug".to_string(),
    })];
    assert_eq!(provider.create_types(&mut types).unwrap(), 1);
    let mut brands = vec![Record::added(CatalogBrand {
        id: 1,
        brand: "Contoso".to_string(),
    })];
    assert_eq!(provider.create_brands(&mut brands).unwrap(), 1);
    assert_eq!(provider.get_types().unwrap().len(), 1);
    assert_eq!(provider.get_brands().unwrap().len(), 1);

    let mut items = vec![Record::added(widget())];
    assert_eq!(provider.create_items(&mut items).unwrap(), 1);
    let id = items[0].data.id;
    assert!(id > 0);

    let stored = provider.get_item_by_id(id).unwrap().unwrap();
    assert_eq!(stored.name, "Widget");
    assert_eq!(stored.price, Decimal::new(999, 2));

    let mut changed = stored.clone();
    changed.price = "12.49".parse().unwrap();
    let mut batch = vec![Record::modified(changed)];
    assert_eq!(provider.update_items(&mut batch).unwrap(), 1);
    let updated = provider.get_item_by_id(id).unwrap().unwrap();
    assert_eq!(updated.price, Decimal::new(1249, 2));

    let filtered = provider
        .get_items(&ItemFilter {
            type_id: Some(1),
            name_contains: Some("widg".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);

    assert_eq!(provider.insert_image(id, "png", &[1, 2, 3]).unwrap(), 1);
    let image = provider.get_image(id).unwrap().unwrap();
    assert_eq!(image.image_type, "png");

    assert_eq!(provider.delete_item(id).unwrap(), 1);
    assert!(provider.get_item_by_id(id).unwrap().is_none());
}
