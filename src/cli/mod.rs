pub mod categorize;
pub mod report;
pub mod rules;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sift",
    version,
    about = "Normalize messy transaction CSVs and summarize spend by category."
)]
pub struct Cli {
    /// Settings file (default: ~/.config/sift/settings.json)
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Log debug details, including why each row was dropped
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a transaction CSV and print spend by category.
    Report {
        /// Path to the CSV file (needs date, merchant and amount columns)
        input_csv: String,
        /// Also write the cleaned transactions to this CSV file
        #[arg(long = "output-clean")]
        output_clean: Option<String>,
    },
    /// List the built-in categorization rules in match order.
    Rules,
    /// Show the canonical form and category of a merchant name.
    Categorize {
        /// Merchant name as it appears in a statement
        merchant: String,
    },
}
