//! End-to-end import flow: CSV file on disk -> mapped rows -> records ->
//! financials, the way the CLI drives it.

use caseback::finance::compute_financials;
use caseback::importer::{preview_inventory, preview_sales, read_rows};
use caseback::mapping::{validate_mapping, inventory_fields, Mapping};
use caseback::models::Status;
use caseback::transform::{apply_sale, ASKING_PRICE_LABEL};

const UNIFIED_CSV: &str = "\
ID,Brand,Model,Status,Cost,Sold For,Asking Price,Service History
W001,Rolex,Submariner,Sold,\"$9,500\",\"$12,500.00\",,Full service 2023
W002,Omega,Speedmaster,For Sale,\"$4,200\",,\"$5,800\",
W003,,Datejust,,\"$6,000\",,,
W004,Tudor,Black Bay,,\"$3,200\",\"$4,100\",,Polished
";

fn unified_mapping() -> Mapping {
    serde_json::from_str(
        r#"{
            "ID": "importId",
            "Brand": "brand",
            "Model": "model",
            "Status": "status",
            "Cost": "purchasePrice",
            "Sold For": "salePrice",
            "Asking Price": "askingPrice",
            "Service History": "custom"
        }"#,
    )
    .unwrap()
}

#[test]
fn unified_inventory_file_imports_with_row_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unified.csv");
    std::fs::write(&path, UNIFIED_CSV).unwrap();

    let mapping = unified_mapping();
    assert!(validate_mapping(&mapping, inventory_fields()).valid);

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows.len(), 4);

    let preview = preview_inventory(&rows, &mapping);
    assert_eq!(preview.success, 3);
    assert_eq!(preview.errors, vec!["Row 3: missing brand".to_string()]);

    // W001: explicit sold status, prices normalized.
    let sold = &preview.records[0];
    assert_eq!(sold.import_id.as_deref(), Some("W001"));
    assert_eq!(sold.status, Status::Sold);
    assert_eq!(sold.purchase_price, Some(9500.0));
    assert_eq!(sold.sale_price, Some(12500.0));
    assert_eq!(
        sold.custom_data.get("Service History").map(String::as_str),
        Some("Full service 2023")
    );

    // W002: explicit for-sale status; asking price verbatim, unparsed.
    let listed = &preview.records[1];
    assert_eq!(listed.status, Status::InStock);
    assert_eq!(listed.sale_price, None);
    assert_eq!(
        listed.custom_data.get(ASKING_PRICE_LABEL).map(String::as_str),
        Some("$5,800")
    );

    // W004: no status column value, but a sale price: inferred sold.
    let inferred = &preview.records[2];
    assert_eq!(inferred.status, Status::Sold);
    assert_eq!(inferred.sale_price, Some(4100.0));
}

#[test]
fn financials_flow_from_imported_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unified.csv");
    std::fs::write(&path, UNIFIED_CSV).unwrap();

    let rows = read_rows(&path).unwrap();
    let preview = preview_inventory(&rows, &unified_mapping());

    let sold = compute_financials(&preview.records[0]);
    assert_eq!(sold.total_cost, 9500.0);
    assert_eq!(sold.net_proceeds, 12500.0);
    assert_eq!(sold.profit, 3000.0);

    let listed = compute_financials(&preview.records[1]);
    assert_eq!(listed.total_cost, 4200.0);
    assert_eq!(listed.profit, 0.0);
    assert_eq!(listed.roi_percent, 0.0);
}

#[test]
fn sales_file_updates_matched_inventory() {
    let dir = tempfile::tempdir().unwrap();

    let inv_path = dir.path().join("inventory.csv");
    std::fs::write(
        &inv_path,
        "ID,Brand,Model,Cost\nW001,Rolex,Submariner,\"$9,500\"\n",
    )
    .unwrap();
    let inv_mapping: Mapping = serde_json::from_str(
        r#"{"ID": "importId", "Brand": "brand", "Model": "model", "Cost": "purchasePrice"}"#,
    )
    .unwrap();
    let inventory = preview_inventory(&read_rows(&inv_path).unwrap(), &inv_mapping);
    let mut watch = inventory.records[0].clone();
    assert_eq!(watch.status, Status::InStock);

    let sales_path = dir.path().join("sales.csv");
    std::fs::write(
        &sales_path,
        "Watch ID,Date Sold,Final Price,Venue,Fees\n\
         W001,06/01/2024,\"$12,500\",Chrono24,\"$1,100\"\n\
         ,06/02/2024,\"$3,000\",eBay,\"$300\"\n",
    )
    .unwrap();
    let sales_mapping: Mapping = serde_json::from_str(
        r#"{
            "Watch ID": "importId",
            "Date Sold": "saleDate",
            "Final Price": "salePrice",
            "Venue": "salePlatform",
            "Fees": "platformFees"
        }"#,
    )
    .unwrap();
    let sales = preview_sales(&read_rows(&sales_path).unwrap(), &sales_mapping);
    assert_eq!(sales.success, 1);
    assert_eq!(sales.errors, vec!["Row 2: missing Watch ID".to_string()]);

    let update = &sales.updates[0];
    assert_eq!(update.import_id, watch.import_id.clone().unwrap());
    apply_sale(&mut watch, update);

    assert_eq!(watch.status, Status::Sold);
    assert_eq!(
        watch.sale_date,
        chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
    );
    let snapshot = compute_financials(&watch);
    assert_eq!(snapshot.total_fees, 1100.0);
    assert_eq!(snapshot.profit, 12500.0 - 1100.0 - 9500.0);
}
