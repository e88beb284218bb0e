//! Import normalization and profit derivation for a watch dealer's
//! inventory book: free-form spreadsheet exports in, canonical records
//! and consistent financial figures out.

pub mod cli;
pub mod error;
pub mod fields;
pub mod finance;
pub mod fmt;
pub mod importer;
pub mod mapping;
pub mod models;
pub mod trade;
pub mod transform;
