use std::sync::OnceLock;

use regex::Regex;

use crate::models::{CategorizedRecord, Category, NormalizedRecord};

/// Keyword rules, checked top to bottom against the canonical merchant.
/// The first rule with a matching keyword decides the category.
pub const RULES: &[(Category, &[&str])] = &[
    (Category::Transport, &["UBER", "LYFT", "TAXI", "TRANSIT", "RIDE"]),
    (Category::Coffee, &["STARBUCKS", "DUNKIN", "COFFEE", "CAFE"]),
    (
        Category::Shopping,
        &["AMAZON", "AMZN", "WALMART", "TARGET", "STORE", "SHOP"],
    ),
    (
        Category::Housing,
        &["RENT", "MORTGAGE", "LANDLORD", "HOUSING", "UTILITY"],
    ),
    (
        Category::Entertainment,
        &["NETFLIX", "SPOTIFY", "CINEMA", "ENTERTAINMENT"],
    ),
];

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("invalid ws regex"))
}

/// Trim, collapse whitespace runs to a single space and uppercase.
pub fn canonicalize_merchant(merchant: &str) -> String {
    ws_re().replace_all(merchant.trim(), " ").to_uppercase()
}

fn category_for(canonical: &str) -> Category {
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| canonical.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Canonical merchant label plus its category. Total over all inputs.
pub fn categorize(raw_merchant: &str) -> (String, Category) {
    let canonical = canonicalize_merchant(raw_merchant);
    let category = category_for(&canonical);
    (canonical, category)
}

pub fn categorize_records(records: Vec<NormalizedRecord>) -> Vec<CategorizedRecord> {
    records
        .into_iter()
        .map(|r| {
            let (canonical_merchant, category) = categorize(&r.merchant);
            CategorizedRecord {
                date: r.date,
                merchant: r.merchant,
                amount: r.amount,
                canonical_merchant,
                category,
            }
        })
        .collect()
}
