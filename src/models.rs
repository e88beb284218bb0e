use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CasebackError;

/// One raw CSV row: column header -> cell text.
pub type RawRow = BTreeMap<String, String>;

/// Lifecycle tag of an inventory item. The string spellings are stored
/// data and must not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    InStock,
    Sold,
    Traded,
    Consigned,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::Sold => "sold",
            Self::Traded => "traded",
            Self::Consigned => "consigned",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = CasebackError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "sold" => Ok(Self::Sold),
            "traded" => Ok(Self::Traded),
            "consigned" => Ok(Self::Consigned),
            other => Err(CasebackError::Other(format!("unknown status: {other}"))),
        }
    }
}

/// A watch as it exists after row transformation: typed fields where
/// parsing succeeded, `None` where the source cell was absent or
/// unparseable. Brand and model may be empty here; creation-readiness is
/// checked separately via `validate_required`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchRecord {
    pub brand: String,
    pub model: String,
    pub reference: Option<String>,
    pub serial: Option<String>,
    pub year: Option<String>,
    pub case_material: Option<String>,
    pub dial_color: Option<String>,
    pub diameter: Option<f64>,
    pub condition: Option<String>,
    pub accessories: Option<String>,
    pub notes: Option<String>,
    pub import_id: Option<String>,

    pub purchase_date: Option<NaiveDate>,
    pub purchase_source: Option<String>,
    pub purchase_price: Option<f64>,
    pub purchase_shipping_cost: Option<f64>,
    pub additional_costs: Option<f64>,

    pub sale_date: Option<NaiveDate>,
    pub sale_price: Option<f64>,
    pub sale_platform: Option<String>,
    pub platform_fees: Option<f64>,
    pub sales_tax: Option<f64>,
    pub marketing_costs: Option<f64>,
    pub shipping_costs: Option<f64>,

    pub status: Status,

    /// Spreadsheet columns worth keeping that have no canonical field,
    /// plus the verbatim asking price when one was supplied.
    #[serde(default)]
    pub custom_data: BTreeMap<String, String>,
}

/// Derived monetary view of a record. Never stored; always recomputed
/// from the current field values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub total_cost: f64,
    pub total_fees: f64,
    pub net_proceeds: f64,
    pub profit: f64,
    pub roi_percent: f64,
    pub margin_percent: f64,
}

/// Result of a required-field precondition check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_stored_spelling() {
        for (status, text) in [
            (Status::InStock, "in_stock"),
            (Status::Sold, "sold"),
            (Status::Traded, "traded"),
            (Status::Consigned, "consigned"),
        ] {
            assert_eq!(status.as_str(), text);
            assert_eq!(text.parse::<Status>().unwrap(), status);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{text}\""));
        }
    }

    #[test]
    fn test_status_rejects_unknown_spelling() {
        assert!("Sold".parse::<Status>().is_err());
        assert!("instock".parse::<Status>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = WatchRecord {
            brand: "Rolex".to_string(),
            model: "Submariner".to_string(),
            purchase_price: Some(9500.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"purchasePrice\":9500.0"));
        assert!(json.contains("\"status\":\"in_stock\""));
        assert!(json.contains("\"customData\":{}"));
    }
}
