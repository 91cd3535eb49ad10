use std::collections::BTreeMap;

use crate::models::{CategorizedRecord, Category};

// ---------------------------------------------------------------------------
// Spend by category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Absolute spend per category. Categories without records are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendSummary {
    pub totals: BTreeMap<Category, f64>,
}

impl SpendSummary {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Categories by descending total; equal totals fall back to name order.
    pub fn ranked(&self) -> Vec<CategoryTotal> {
        let mut items: Vec<CategoryTotal> = self
            .totals
            .iter()
            .map(|(category, total)| CategoryTotal {
                category: *category,
                total: *total,
            })
            .collect();
        items.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });
        items
    }

    pub fn top_category(&self) -> Option<CategoryTotal> {
        self.ranked().into_iter().next()
    }

    pub fn grand_total(&self) -> f64 {
        self.totals.values().sum()
    }
}

pub fn aggregate(records: &[CategorizedRecord]) -> SpendSummary {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.category).or_default() += record.amount.abs();
    }
    SpendSummary { totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(category: Category, amount: f64) -> CategorizedRecord {
        CategorizedRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            merchant: "X".to_string(),
            amount,
            canonical_merchant: "X".to_string(),
            category,
        }
    }

    #[test]
    fn test_sums_absolute_amounts() {
        let records = vec![
            record(Category::Transport, -10.0),
            record(Category::Transport, 20.0),
            record(Category::Transport, -5.0),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.totals[&Category::Transport], 35.0);
        assert_eq!(summary.totals.len(), 1);
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let summary = aggregate(&[record(Category::Coffee, 3.0), record(Category::Coffee, -2.0)]);
        assert_eq!(summary.totals.get(&Category::Coffee), Some(&5.0));
        assert!(!summary.totals.contains_key(&Category::Transport));
        assert!(!summary.totals.contains_key(&Category::Other));
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&[]);
        assert!(summary.is_empty());
        assert!(summary.ranked().is_empty());
        assert_eq!(summary.top_category(), None);
        assert_eq!(summary.grand_total(), 0.0);
    }

    #[test]
    fn test_top_category() {
        let records = vec![
            record(Category::Transport, 10.0),
            record(Category::Transport, 5.0),
            record(Category::Coffee, 3.0),
            record(Category::Shopping, 100.0),
        ];
        let top = aggregate(&records).top_category().unwrap();
        assert_eq!(top.category, Category::Shopping);
        assert_eq!(top.total, 100.0);
    }

    #[test]
    fn test_ranked_descending() {
        let records = vec![
            record(Category::Coffee, 4.0),
            record(Category::Housing, -1200.0),
            record(Category::Transport, 35.5),
        ];
        let order: Vec<Category> = aggregate(&records).ranked().iter().map(|c| c.category).collect();
        assert_eq!(order, vec![Category::Housing, Category::Transport, Category::Coffee]);
    }

    #[test]
    fn test_ties_break_by_name() {
        let records = vec![
            record(Category::Transport, 10.0),
            record(Category::Other, 10.0),
            record(Category::Coffee, -10.0),
            record(Category::Entertainment, 2.0),
        ];
        let summary = aggregate(&records);
        let order: Vec<Category> = summary.ranked().iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![Category::Coffee, Category::Other, Category::Transport, Category::Entertainment]
        );
        assert_eq!(summary.top_category().unwrap().category, Category::Coffee);
    }

    #[test]
    fn test_grand_total_matches_records() {
        let records = vec![
            record(Category::Transport, -10.0),
            record(Category::Coffee, 2.5),
            record(Category::Other, -7.25),
        ];
        let expected: f64 = records.iter().map(|r| r.amount.abs()).sum();
        assert_eq!(aggregate(&records).grand_total(), expected);
    }
}
