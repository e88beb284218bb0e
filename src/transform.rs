//! Row transformation: one resolved row in, one structured record out.
//! Transformation never fails — anything unparseable lands as `None`.
//! Callers run `validate_required` first and skip rows that fail it.

use chrono::NaiveDate;

use crate::fields::{clean_string, normalize_status, parse_date, parse_number, try_parse_json};
use crate::mapping::{FieldKey, CUSTOM_DATA_KEY};
use crate::models::{RawRow, Status, Validation, WatchRecord};

/// Custom-data label under which an asking price is retained verbatim.
pub const ASKING_PRICE_LABEL: &str = "Asking Price";

fn cell<'a>(row: &'a RawRow, key: FieldKey) -> Option<&'a str> {
    row.get(key.as_str()).map(String::as_str)
}

/// Precondition check: every required field present and non-blank.
/// `missing` preserves the order of `required`, for stable error text.
pub fn validate_required(row: &RawRow, required: &[FieldKey]) -> Validation {
    let mut missing = Vec::new();
    for key in required {
        let present = row
            .get(key.as_str())
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false);
        if !present {
            missing.push(key.as_str().to_string());
        }
    }
    Validation { valid: missing.is_empty(), missing }
}

/// Transform one resolved row into a watch record.
///
/// Status inference is fed the raw sale-price string, not the parsed
/// number — `parse_number` returning `None` is itself the signal. The
/// asking price is business metadata, not accounting data: it stays an
/// unparsed string in the custom bag and is never promoted to a typed
/// field.
pub fn transform_row(row: &RawRow) -> WatchRecord {
    let mut custom_data = std::collections::BTreeMap::new();
    if let Some(raw) = row.get(CUSTOM_DATA_KEY) {
        custom_data.extend(try_parse_json(raw));
    }
    if let Some(asking) = cell(row, FieldKey::AskingPrice) {
        if !asking.is_empty() {
            custom_data.insert(ASKING_PRICE_LABEL.to_string(), asking.to_string());
        }
    }

    WatchRecord {
        brand: clean_string(cell(row, FieldKey::Brand)).unwrap_or_default(),
        model: clean_string(cell(row, FieldKey::Model)).unwrap_or_default(),
        reference: clean_string(cell(row, FieldKey::Reference)),
        serial: clean_string(cell(row, FieldKey::Serial)),
        year: clean_string(cell(row, FieldKey::Year)),
        case_material: clean_string(cell(row, FieldKey::CaseMaterial)),
        dial_color: clean_string(cell(row, FieldKey::DialColor)),
        diameter: parse_number(cell(row, FieldKey::Diameter)),
        condition: clean_string(cell(row, FieldKey::Condition)),
        accessories: clean_string(cell(row, FieldKey::Accessories)),
        notes: clean_string(cell(row, FieldKey::Notes)),
        import_id: clean_string(cell(row, FieldKey::ImportId)),

        purchase_date: parse_date(cell(row, FieldKey::PurchaseDate)),
        purchase_source: clean_string(cell(row, FieldKey::PurchaseSource)),
        purchase_price: parse_number(cell(row, FieldKey::PurchasePrice)),
        purchase_shipping_cost: parse_number(cell(row, FieldKey::PurchaseShippingCost)),
        additional_costs: parse_number(cell(row, FieldKey::AdditionalCosts)),

        sale_date: parse_date(cell(row, FieldKey::SaleDate)),
        sale_price: parse_number(cell(row, FieldKey::SalePrice)),
        sale_platform: clean_string(cell(row, FieldKey::SalePlatform)),
        platform_fees: parse_number(cell(row, FieldKey::PlatformFees)),
        sales_tax: parse_number(cell(row, FieldKey::SalesTax)),
        marketing_costs: parse_number(cell(row, FieldKey::MarketingCosts)),
        shipping_costs: parse_number(cell(row, FieldKey::ShippingCosts)),

        status: normalize_status(cell(row, FieldKey::Status), cell(row, FieldKey::SalePrice)),

        custom_data,
    }
}

/// Sale fields parsed from a sales-import row, applied to an inventory
/// record matched by watch ID upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleUpdate {
    pub import_id: String,
    pub sale_date: Option<NaiveDate>,
    pub sale_price: Option<f64>,
    pub sale_platform: Option<String>,
    pub platform_fees: Option<f64>,
    pub sales_tax: Option<f64>,
    pub marketing_costs: Option<f64>,
    pub shipping_costs: Option<f64>,
}

/// Transform a resolved sales row. `None` when the watch ID is missing,
/// since there is nothing to match the update against.
pub fn transform_sales_row(row: &RawRow) -> Option<SaleUpdate> {
    let import_id = clean_string(cell(row, FieldKey::ImportId))?;
    Some(SaleUpdate {
        import_id,
        sale_date: parse_date(cell(row, FieldKey::SaleDate)),
        sale_price: parse_number(cell(row, FieldKey::SalePrice)),
        sale_platform: clean_string(cell(row, FieldKey::SalePlatform)),
        platform_fees: parse_number(cell(row, FieldKey::PlatformFees)),
        sales_tax: parse_number(cell(row, FieldKey::SalesTax)),
        marketing_costs: parse_number(cell(row, FieldKey::MarketingCosts)),
        shipping_costs: parse_number(cell(row, FieldKey::ShippingCosts)),
    })
}

/// Write a sale update onto a record and mark it sold.
pub fn apply_sale(record: &mut WatchRecord, update: &SaleUpdate) {
    record.sale_date = update.sale_date;
    record.sale_price = update.sale_price;
    record.sale_platform = update.sale_platform.clone();
    record.platform_fees = update.platform_fees;
    record.sales_tax = update.sales_tax;
    record.marketing_costs = update.marketing_costs;
    record.shipping_costs = update.shipping_costs;
    record.status = Status::Sold;
}
