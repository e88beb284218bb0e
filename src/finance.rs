//! Profit math. Every figure is recomputed from the record's current
//! monetary fields, so edits propagate with no cache to invalidate.
//! Absent values count as zero in sums; zero-division cases report 0.

use crate::models::{FinancialSnapshot, WatchRecord};

fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn has_sale(watch: &WatchRecord) -> bool {
    matches!(watch.sale_price, Some(price) if price != 0.0)
}

/// Cost basis: purchase price plus inbound shipping plus service/repair
/// costs.
pub fn total_cost(watch: &WatchRecord) -> f64 {
    or_zero(watch.purchase_price)
        + or_zero(watch.purchase_shipping_cost)
        + or_zero(watch.additional_costs)
}

/// Selling costs. Sales tax is tracked on the record but is money
/// collected on behalf of the state, not a fee the seller pays, so it is
/// excluded here — and every caller uses this one definition.
pub fn total_fees(watch: &WatchRecord) -> f64 {
    or_zero(watch.platform_fees)
        + or_zero(watch.shipping_costs)
        + or_zero(watch.marketing_costs)
}

/// Sale price net of fees; 0 for an unsold watch.
pub fn net_proceeds(watch: &WatchRecord) -> f64 {
    if !has_sale(watch) {
        return 0.0;
    }
    or_zero(watch.sale_price) - total_fees(watch)
}

/// Net proceeds minus cost basis; 0 for an unsold watch. Losses are
/// negative and not clamped.
pub fn profit(watch: &WatchRecord) -> f64 {
    if !has_sale(watch) {
        return 0.0;
    }
    net_proceeds(watch) - total_cost(watch)
}

/// Profit as a percentage of cost basis. A cost-free acquisition has no
/// meaningful ROI; reported as 0 by convention.
pub fn roi_percent(watch: &WatchRecord) -> f64 {
    let cost = total_cost(watch);
    if cost == 0.0 {
        return 0.0;
    }
    profit(watch) / cost * 100.0
}

/// Profit as a percentage of sale price; 0 for an unsold watch.
pub fn margin_percent(watch: &WatchRecord) -> f64 {
    if !has_sale(watch) {
        return 0.0;
    }
    profit(watch) / or_zero(watch.sale_price) * 100.0
}

pub fn compute_financials(watch: &WatchRecord) -> FinancialSnapshot {
    FinancialSnapshot {
        total_cost: total_cost(watch),
        total_fees: total_fees(watch),
        net_proceeds: net_proceeds(watch),
        profit: profit(watch),
        roi_percent: roi_percent(watch),
        margin_percent: margin_percent(watch),
    }
}
