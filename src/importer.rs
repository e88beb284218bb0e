//! Batch import: CSV file -> raw rows -> mapped, validated, transformed
//! records, with per-row errors collected in original row order so a
//! report can say exactly which line was skipped and why.

use std::path::Path;

use crate::error::Result;
use crate::mapping::{apply_mapping, FieldKey, Mapping};
use crate::models::{RawRow, WatchRecord};
use crate::transform::{transform_row, transform_sales_row, validate_required, SaleUpdate};

const INVENTORY_REQUIRED: &[FieldKey] = &[FieldKey::Brand, FieldKey::Model];

/// Read a CSV file into header-keyed rows. Fully blank lines are
/// dropped; everything else is kept for the preview to judge.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (i, cell) in record.iter().enumerate() {
            let Some(header) = headers.get(i) else { continue };
            let header = header.trim();
            if !header.is_empty() {
                row.insert(header.to_string(), cell.to_string());
            }
        }
        if row.values().all(|v| v.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

pub struct ImportPreview {
    pub records: Vec<WatchRecord>,
    /// One entry per skipped row: "Row N: missing brand, model".
    pub errors: Vec<String>,
    pub success: usize,
    pub skipped: usize,
}

/// Run an inventory batch: map, validate brand/model, transform. Rows
/// failing validation are reported and skipped; the batch continues.
pub fn preview_inventory(rows: &[RawRow], mapping: &Mapping) -> ImportPreview {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (i, raw) in rows.iter().enumerate() {
        let resolved = apply_mapping(raw, mapping);
        let check = validate_required(&resolved, INVENTORY_REQUIRED);
        if !check.valid {
            errors.push(format!("Row {}: missing {}", i + 1, check.missing.join(", ")));
            continue;
        }
        records.push(transform_row(&resolved));
    }

    ImportPreview {
        success: records.len(),
        skipped: errors.len(),
        records,
        errors,
    }
}

pub struct SalesPreview {
    pub updates: Vec<SaleUpdate>,
    pub errors: Vec<String>,
    pub success: usize,
    pub skipped: usize,
}

/// Run a sales batch: each row must carry a watch ID to match against
/// existing inventory.
pub fn preview_sales(rows: &[RawRow], mapping: &Mapping) -> SalesPreview {
    let mut updates = Vec::new();
    let mut errors = Vec::new();

    for (i, raw) in rows.iter().enumerate() {
        let resolved = apply_mapping(raw, mapping);
        match transform_sales_row(&resolved) {
            Some(update) => updates.push(update),
            None => errors.push(format!("Row {}: missing Watch ID", i + 1)),
        }
    }

    SalesPreview {
        success: updates.len(),
        skipped: errors.len(),
        updates,
        errors,
    }
}
