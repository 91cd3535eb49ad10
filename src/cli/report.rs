use colored::Colorize;
use tracing::debug;

use crate::categorizer::categorize_records;
use crate::error::Result;
use crate::exporter::write_clean_csv;
use crate::importer::{normalize_records, read_transactions};
use crate::reports::{aggregate, SpendSummary};
use crate::settings::expand_home;

pub fn run(input_csv: &str, output_clean: Option<&str>) -> Result<()> {
    let input_path = expand_home(input_csv);
    println!("Reading transactions from: {}", input_path.display());
    let raw = read_transactions(&input_path)?;
    println!("Loaded {} row(s)", raw.len());

    println!("Normalizing dates and amounts...");
    let normalized = normalize_records(raw);
    println!(
        "Valid transactions after normalization: {}",
        normalized.records.len()
    );

    println!("Categorizing transactions...");
    let records = categorize_records(normalized.records);
    let summary = aggregate(&records);
    debug!(
        categories = summary.totals.len(),
        grand_total = summary.grand_total(),
        "aggregated spend"
    );
    print!("{}", format_spend_report(&summary));

    if let Some(output) = output_clean {
        let path = expand_home(output);
        // Export failures are reported but do not fail the run.
        match write_clean_csv(&records, &path) {
            Ok(()) => println!("Cleaned data written to: {}", path.display()),
            Err(e) => eprintln!(
                "{}",
                format!("Warning: Could not write cleaned CSV: {e}").yellow()
            ),
        }
    }
    Ok(())
}

pub fn format_spend_report(summary: &SpendSummary) -> String {
    let mut out = String::from("\n");
    if summary.is_empty() {
        out.push_str("No spending data available.\n");
        return out;
    }
    out.push_str("=== Spend by category ===\n");
    for item in summary.ranked() {
        out.push_str(&format!("{}: ${:.2}\n", item.category, item.total));
    }
    if let Some(top) = summary.top_category() {
        out.push_str(&format!("\nTop spending category: {}\n", top.category));
    }
    out
}
