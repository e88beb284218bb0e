//! Column mapping: which CSV header feeds which canonical field. The
//! mapping itself is produced upstream (a human-adjusted AI suggestion);
//! this module validates it and applies it to raw rows.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CasebackError, Result};
use crate::models::{RawRow, Validation};

/// Resolved-row key under which custom columns travel as a JSON object.
pub const CUSTOM_DATA_KEY: &str = "_customData";

/// One canonical field a CSV column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    ImportId,
    Brand,
    Model,
    Reference,
    Serial,
    Year,
    CaseMaterial,
    DialColor,
    Diameter,
    Condition,
    Accessories,
    Notes,
    PurchaseDate,
    PurchaseSource,
    PurchasePrice,
    PurchaseShippingCost,
    AdditionalCosts,
    SaleDate,
    SalePrice,
    SalePlatform,
    PlatformFees,
    SalesTax,
    MarketingCosts,
    ShippingCosts,
    Status,
    AskingPrice,
}

const ALL_KEYS: &[FieldKey] = &[
    FieldKey::ImportId,
    FieldKey::Brand,
    FieldKey::Model,
    FieldKey::Reference,
    FieldKey::Serial,
    FieldKey::Year,
    FieldKey::CaseMaterial,
    FieldKey::DialColor,
    FieldKey::Diameter,
    FieldKey::Condition,
    FieldKey::Accessories,
    FieldKey::Notes,
    FieldKey::PurchaseDate,
    FieldKey::PurchaseSource,
    FieldKey::PurchasePrice,
    FieldKey::PurchaseShippingCost,
    FieldKey::AdditionalCosts,
    FieldKey::SaleDate,
    FieldKey::SalePrice,
    FieldKey::SalePlatform,
    FieldKey::PlatformFees,
    FieldKey::SalesTax,
    FieldKey::MarketingCosts,
    FieldKey::ShippingCosts,
    FieldKey::Status,
    FieldKey::AskingPrice,
];

impl FieldKey {
    /// The spelling used in mapping files and resolved rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImportId => "importId",
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Reference => "reference",
            Self::Serial => "serial",
            Self::Year => "year",
            Self::CaseMaterial => "caseMaterial",
            Self::DialColor => "dialColor",
            Self::Diameter => "diameter",
            Self::Condition => "condition",
            Self::Accessories => "accessories",
            Self::Notes => "notes",
            Self::PurchaseDate => "purchaseDate",
            Self::PurchaseSource => "purchaseSource",
            Self::PurchasePrice => "purchasePrice",
            Self::PurchaseShippingCost => "purchaseShippingCost",
            Self::AdditionalCosts => "additionalCosts",
            Self::SaleDate => "saleDate",
            Self::SalePrice => "salePrice",
            Self::SalePlatform => "salePlatform",
            Self::PlatformFees => "platformFees",
            Self::SalesTax => "salesTax",
            Self::MarketingCosts => "marketingCosts",
            Self::ShippingCosts => "shippingCosts",
            Self::Status => "status",
            Self::AskingPrice => "askingPrice",
        }
    }

    pub fn parse(key: &str) -> Option<FieldKey> {
        ALL_KEYS.iter().find(|k| k.as_str() == key).copied()
    }
}

/// Where one CSV column goes: a canonical field, the custom-data bag, or
/// nowhere at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTarget {
    Field(FieldKey),
    Custom,
    Skip,
}

// Mapping files interoperate with the upstream suggestion step, which
// emits a field key string, the string "custom", or null per header.
impl Serialize for ColumnTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Field(key) => serializer.serialize_str(key.as_str()),
            Self::Custom => serializer.serialize_str("custom"),
            Self::Skip => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ColumnTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None => Ok(Self::Skip),
            Some("custom") => Ok(Self::Custom),
            Some(key) => FieldKey::parse(key)
                .map(Self::Field)
                .ok_or_else(|| D::Error::custom(format!("unknown field key: {key}"))),
        }
    }
}

/// Header -> target, for one import file.
pub type Mapping = BTreeMap<String, ColumnTarget>;

pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CasebackError::Mapping(e.to_string()))
}

/// Resolve a raw CSV row into a canonical-keyed row. Custom columns are
/// gathered into a JSON object under `_customData`; skipped and unmapped
/// headers are dropped; blank cells are not propagated.
pub fn apply_mapping(raw: &RawRow, mapping: &Mapping) -> RawRow {
    let mut resolved = RawRow::new();
    let mut custom: BTreeMap<&str, &str> = BTreeMap::new();

    for (header, cell) in raw {
        if cell.trim().is_empty() {
            continue;
        }
        match mapping.get(header) {
            Some(ColumnTarget::Field(key)) => {
                resolved.insert(key.as_str().to_string(), cell.clone());
            }
            Some(ColumnTarget::Custom) => {
                custom.insert(header.as_str(), cell.as_str());
            }
            Some(ColumnTarget::Skip) | None => {}
        }
    }

    if !custom.is_empty() {
        if let Ok(json) = serde_json::to_string(&custom) {
            resolved.insert(CUSTOM_DATA_KEY.to_string(), json);
        }
    }
    resolved
}

// ---------------------------------------------------------------------------
// Field catalog — what the upstream mapping step is allowed to target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub description: &'static str,
    pub required: bool,
}

const fn optional(key: FieldKey, label: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec { key, label, description, required: false }
}

const fn required(key: FieldKey, label: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec { key, label, description, required: true }
}

const INVENTORY_FIELDS: &[FieldSpec] = &[
    optional(FieldKey::ImportId, "ID", "Unique identifier for matching sales data"),
    required(FieldKey::Brand, "Brand", "Watch brand (e.g., Rolex, Omega)"),
    required(FieldKey::Model, "Model", "Watch model name"),
    optional(FieldKey::Reference, "Reference", "Reference/model number"),
    optional(FieldKey::Serial, "Serial", "Serial number"),
    optional(FieldKey::Year, "Year", "Production year"),
    optional(FieldKey::CaseMaterial, "Case Material", "Material (steel, gold, etc.)"),
    optional(FieldKey::DialColor, "Dial Color", "Color of the dial"),
    optional(FieldKey::Diameter, "Diameter", "Case diameter in mm"),
    optional(FieldKey::Condition, "Condition", "Watch condition"),
    optional(FieldKey::Accessories, "Accessories", "Included items (box, papers, etc.)"),
    optional(FieldKey::PurchaseDate, "Purchase Date", "Date acquired"),
    optional(FieldKey::PurchaseSource, "Purchase Source", "Where purchased from"),
    optional(FieldKey::PurchasePrice, "Purchase Price", "Amount paid for watch"),
    optional(FieldKey::PurchaseShippingCost, "Purchase Shipping", "Inbound shipping cost"),
    optional(FieldKey::AdditionalCosts, "Additional Costs", "Service, repairs, etc."),
    optional(FieldKey::SaleDate, "Sale Date", "Date of sale, if already sold"),
    optional(FieldKey::SalePrice, "Sale Price", "Total sale amount, if already sold"),
    optional(FieldKey::Status, "Status", "Inventory status (sold, for sale, traded, ...)"),
    optional(FieldKey::AskingPrice, "Asking Price", "Listed asking price (kept as custom data)"),
    optional(FieldKey::Notes, "Notes", "Any additional notes"),
];

const SALES_FIELDS: &[FieldSpec] = &[
    required(FieldKey::ImportId, "Watch ID", "ID matching the inventory record"),
    optional(FieldKey::SaleDate, "Sale Date", "Date of sale"),
    optional(FieldKey::SalePrice, "Sale Price", "Total sale amount"),
    optional(FieldKey::SalePlatform, "Sale Platform", "Where it was sold"),
    optional(FieldKey::PlatformFees, "Platform Fees", "eBay, PayPal fees, etc."),
    optional(FieldKey::SalesTax, "Sales Tax", "Tax collected"),
    optional(FieldKey::MarketingCosts, "Marketing Costs", "Advertising costs"),
    optional(FieldKey::ShippingCosts, "Shipping Costs", "Outbound shipping cost"),
];

pub fn inventory_fields() -> &'static [FieldSpec] {
    INVENTORY_FIELDS
}

pub fn sales_fields() -> &'static [FieldSpec] {
    SALES_FIELDS
}

/// Check an upstream-proposed mapping against a catalog: every required
/// field must be targeted by at least one column.
pub fn validate_mapping(mapping: &Mapping, fields: &[FieldSpec]) -> Validation {
    let mut missing = Vec::new();
    for field in fields.iter().filter(|f| f.required) {
        let covered = mapping
            .values()
            .any(|target| matches!(target, ColumnTarget::Field(key) if *key == field.key));
        if !covered {
            missing.push(field.key.as_str().to_string());
        }
    }
    Validation { valid: missing.is_empty(), missing }
}
