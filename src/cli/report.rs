use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::Table;

use crate::cli::preview::load_checked_mapping;
use crate::finance::compute_financials;
use crate::fmt::{money, percent};
use crate::importer::{preview_inventory, read_rows};
use crate::models::Status;

pub fn run(file: &str, mapping_path: &str) -> Result<()> {
    let mapping = load_checked_mapping(mapping_path, false)?;
    let rows = read_rows(Path::new(file)).with_context(|| format!("failed to read {file}"))?;
    let preview = preview_inventory(&rows, &mapping);

    let mut table = Table::new();
    table.set_header(vec![
        "Brand", "Model", "Status", "Cost", "Fees", "Net", "Profit", "ROI", "Margin",
    ]);

    let mut inventory_cost = 0.0;
    let mut realized_profit = 0.0;
    for record in &preview.records {
        let snapshot = compute_financials(record);
        table.add_row(vec![
            record.brand.clone(),
            record.model.clone(),
            record.status.to_string(),
            money(snapshot.total_cost),
            money(snapshot.total_fees),
            money(snapshot.net_proceeds),
            money(snapshot.profit),
            percent(snapshot.roi_percent),
            percent(snapshot.margin_percent),
        ]);
        if record.status == Status::InStock {
            inventory_cost += snapshot.total_cost;
        }
        realized_profit += snapshot.profit;
    }
    println!("{table}");

    println!("Capital in stock: {}", money(inventory_cost).bold());
    let profit_text = money(realized_profit);
    let profit_text = if realized_profit < 0.0 {
        profit_text.red()
    } else {
        profit_text.green()
    };
    println!("Realized profit:  {}", profit_text.bold());

    if !preview.errors.is_empty() {
        println!("{} rows skipped:", preview.errors.len());
        for error in &preview.errors {
            println!("  {}", error.red());
        }
    }
    Ok(())
}
