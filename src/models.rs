use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Spending category. The set is closed; `Other` catches everything the
/// rule table does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Transport,
    Coffee,
    Shopping,
    Housing,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Transport,
        Self::Coffee,
        Self::Shopping,
        Self::Housing,
        Self::Entertainment,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::Coffee => "Coffee",
            Self::Shopping => "Shopping",
            Self::Housing => "Housing",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row as read from the input file, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source file (header is line 1).
    pub line: usize,
    pub date: String,
    pub merchant: String,
    pub amount: String,
}

/// A row whose date and amount both parsed. The merchant is still raw.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedRecord {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub canonical_merchant: String,
    pub category: Category,
}
