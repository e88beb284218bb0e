pub mod fields;
pub mod preview;
pub mod report;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "caseback",
    about = "CSV import normalization and profit tracking for a watch dealer's inventory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the canonical fields a column mapping can target.
    Fields {
        /// Show the sales-import catalog instead of inventory
        #[arg(long)]
        sales: bool,
    },
    /// Validate a mapping and preview how a CSV file would import.
    Preview {
        /// Path to the CSV file
        file: String,
        /// JSON mapping file: header -> field key, "custom", or null
        #[arg(long)]
        mapping: String,
        /// Treat the file as a sales import (rows matched by Watch ID)
        #[arg(long)]
        sales: bool,
    },
    /// Preview an inventory CSV and compute per-watch financials.
    Report {
        /// Path to the CSV file
        file: String,
        /// JSON mapping file: header -> field key, "custom", or null
        #[arg(long)]
        mapping: String,
    },
}
