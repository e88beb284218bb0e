use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use comfy_table::Table;

use crate::fmt::money;
use crate::importer::{preview_inventory, preview_sales, read_rows};
use crate::mapping::{inventory_fields, load_mapping, sales_fields, validate_mapping, Mapping};

pub(crate) fn load_checked_mapping(path: &str, sales: bool) -> Result<Mapping> {
    let mapping =
        load_mapping(Path::new(path)).with_context(|| format!("failed to load mapping {path}"))?;
    let catalog = if sales { sales_fields() } else { inventory_fields() };
    let check = validate_mapping(&mapping, catalog);
    if !check.valid {
        bail!(
            "mapping does not cover required fields: {}",
            check.missing.join(", ")
        );
    }
    Ok(mapping)
}

pub fn run(file: &str, mapping_path: &str, sales: bool) -> Result<()> {
    let mapping = load_checked_mapping(mapping_path, sales)?;
    let rows = read_rows(Path::new(file)).with_context(|| format!("failed to read {file}"))?;

    if sales {
        let preview = preview_sales(&rows, &mapping);
        let mut table = Table::new();
        table.set_header(vec!["Watch ID", "Sale Date", "Sale Price", "Platform", "Fees"]);
        for update in &preview.updates {
            table.add_row(vec![
                update.import_id.clone(),
                update.sale_date.map(|d| d.to_string()).unwrap_or_default(),
                update.sale_price.map(money).unwrap_or_default(),
                update.sale_platform.clone().unwrap_or_default(),
                update.platform_fees.map(money).unwrap_or_default(),
            ]);
        }
        println!("{table}");
        print_outcome(preview.success, &preview.errors);
    } else {
        let preview = preview_inventory(&rows, &mapping);
        let mut table = Table::new();
        table.set_header(vec!["Brand", "Model", "Reference", "Status", "Purchase", "Sale"]);
        for record in &preview.records {
            table.add_row(vec![
                record.brand.clone(),
                record.model.clone(),
                record.reference.clone().unwrap_or_default(),
                record.status.to_string(),
                record.purchase_price.map(money).unwrap_or_default(),
                record.sale_price.map(money).unwrap_or_default(),
            ]);
        }
        println!("{table}");
        print_outcome(preview.success, &preview.errors);
    }
    Ok(())
}

fn print_outcome(success: usize, errors: &[String]) {
    println!(
        "{} ready to import, {} skipped",
        success.to_string().green(),
        errors.len()
    );
    for error in errors {
        println!("  {}", error.red());
    }
}
