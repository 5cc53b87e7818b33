use rust_decimal::Decimal;

use stocklog::{
    core::store::InventoryStore,
    export::{CSV_HEADER, render_csv, write_csv},
    item::ItemDraft,
};

fn draft(category: &str, name: &str, price: Decimal, quantity: i64) -> ItemDraft {
    ItemDraft {
        category: category.to_string(),
        name: name.to_string(),
        price,
        quantity,
    }
}

#[test]
fn empty_store_exports_header_only() {
    let store = InventoryStore::new();
    assert_eq!(store.export_csv(), CSV_HEADER);
}

#[test]
fn rows_follow_canonical_order() {
    let mut store = InventoryStore::new();
    let tote = store.add(draft("Bags", "Tote", Decimal::from(250), 40)).unwrap();
    let gown = store
        .add(draft("Dresses", "Red Gown", Decimal::new(500_000, 2), 3))
        .unwrap();

    let csv = store.export_csv();
    let rows: Vec<&str> = csv.split('\n').collect();
    assert_eq!(rows.len(), store.len() + 1);
    assert_eq!(rows[0], "id,category,name,price,quantity,status,totalValue");
    assert_eq!(rows[1], format!("{gown},Dresses,Red Gown,5000,3,Low Stock,15000"));
    assert_eq!(rows[2], format!("{tote},Bags,Tote,250,40,In Stock,10000"));
}

#[test]
fn embedded_commas_keep_the_row_intact() {
    let mut store = InventoryStore::new();
    let id = store
        .add(draft("Dresses, evening", "Gown \"Aria\"", Decimal::new(1999, 1), 10))
        .unwrap();

    let csv = store.export_csv();
    assert_eq!(
        csv.lines().nth(1).unwrap(),
        format!("{id},\"Dresses, evening\",\"Gown \"\"Aria\"\"\",199.9,10,In Stock,1999")
    );
}

#[test]
fn write_csv_names_file_after_product() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = InventoryStore::new();
    store.add(draft("Bags", "Tote", Decimal::from(250), 40)).unwrap();

    let path = write_csv(dir.path(), "norina-fashions", store.records()).expect("write");
    assert_eq!(path.file_name().unwrap(), "norina-fashions-inventory.csv");
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_csv(store.records()));
}
