//! Trade accounting: one watch leaves inventory, another arrives, and
//! the incoming piece's cost basis is the trade value minus any cash
//! received (or plus cash paid, expressed as a negative difference).

use chrono::NaiveDate;

use crate::error::{CasebackError, Result};
use crate::models::{Status, WatchRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct TradeTerms {
    /// Agreed value of the outgoing watch.
    pub trade_value: f64,
    /// Cash received on top of the incoming watch; negative if cash was
    /// paid out.
    pub cash_difference: Option<f64>,
    pub counterparty: Option<String>,
    /// Defaults to today when absent.
    pub trade_date: Option<NaiveDate>,
}

pub fn cost_basis(terms: &TradeTerms) -> f64 {
    terms.trade_value - terms.cash_difference.unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    /// The traded-away watch with its sale side filled in.
    pub outgoing: WatchRecord,
    /// The received watch, priced at its trade cost basis.
    pub incoming: WatchRecord,
    pub cost_basis: f64,
}

/// Work out both sides of a trade. The outgoing watch must be in stock;
/// anything else is a caller contract violation, not a data-quality
/// issue, and errors out.
pub fn execute_trade(
    outgoing: &WatchRecord,
    incoming: WatchRecord,
    terms: &TradeTerms,
) -> Result<TradeOutcome> {
    if outgoing.status != Status::InStock {
        return Err(CasebackError::Trade(format!(
            "can only trade watches that are in stock (status is {})",
            outgoing.status
        )));
    }

    let basis = cost_basis(terms);
    let date = terms
        .trade_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut outgoing = outgoing.clone();
    outgoing.status = Status::Traded;
    outgoing.sale_date = Some(date);
    outgoing.sale_price = Some(terms.trade_value);
    outgoing.sale_platform = Some("Trade".to_string());

    let mut incoming = incoming;
    incoming.status = Status::InStock;
    incoming.purchase_price = Some(basis);
    incoming.purchase_date = Some(date);
    incoming.purchase_source = Some(format!(
        "Trade - {}",
        terms.counterparty.as_deref().unwrap_or("Unknown")
    ));

    Ok(TradeOutcome { outgoing, incoming, cost_basis: basis })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_stock(brand: &str, model: &str) -> WatchRecord {
        WatchRecord {
            brand: brand.to_string(),
            model: model.to_string(),
            purchase_price: Some(7000.0),
            ..Default::default()
        }
    }

    fn terms() -> TradeTerms {
        TradeTerms {
            trade_value: 8500.0,
            cash_difference: Some(500.0),
            counterparty: Some("Crown & Caliber".to_string()),
            trade_date: NaiveDate::from_ymd_opt(2024, 5, 20),
        }
    }

    #[test]
    fn test_cost_basis_subtracts_cash_received() {
        assert_eq!(cost_basis(&terms()), 8000.0);
        let mut t = terms();
        t.cash_difference = None;
        assert_eq!(cost_basis(&t), 8500.0);
        // Cash paid out increases the basis.
        t.cash_difference = Some(-1000.0);
        assert_eq!(cost_basis(&t), 9500.0);
    }

    #[test]
    fn test_execute_trade_fills_both_sides() {
        let outcome = execute_trade(
            &in_stock("Rolex", "Explorer"),
            in_stock("Omega", "Seamaster"),
            &terms(),
        )
        .unwrap();

        assert_eq!(outcome.outgoing.status, Status::Traded);
        assert_eq!(outcome.outgoing.sale_price, Some(8500.0));
        assert_eq!(outcome.outgoing.sale_platform, Some("Trade".to_string()));
        assert_eq!(
            outcome.outgoing.sale_date,
            NaiveDate::from_ymd_opt(2024, 5, 20)
        );

        assert_eq!(outcome.incoming.status, Status::InStock);
        assert_eq!(outcome.incoming.purchase_price, Some(8000.0));
        assert_eq!(
            outcome.incoming.purchase_source,
            Some("Trade - Crown & Caliber".to_string())
        );
        assert_eq!(outcome.cost_basis, 8000.0);
    }

    #[test]
    fn test_execute_trade_unknown_counterparty() {
        let mut t = terms();
        t.counterparty = None;
        let outcome = execute_trade(
            &in_stock("Rolex", "Explorer"),
            in_stock("Omega", "Seamaster"),
            &t,
        )
        .unwrap();
        assert_eq!(
            outcome.incoming.purchase_source,
            Some("Trade - Unknown".to_string())
        );
    }

    #[test]
    fn test_execute_trade_rejects_non_in_stock() {
        let mut sold = in_stock("Rolex", "Explorer");
        sold.status = Status::Sold;
        let result = execute_trade(&sold, in_stock("Omega", "Seamaster"), &terms());
        assert!(matches!(result, Err(CasebackError::Trade(_))));
    }
}
