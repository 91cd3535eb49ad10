use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("no digits in amount {0:?}")]
    NoDigits(String),
    #[error("more than one decimal point in {0:?}")]
    MultipleDecimalPoints(String),
    #[error("more than one sign in {0:?}")]
    MultipleSigns(String),
    #[error("unexpected characters in amount {0:?}")]
    InvalidCharacters(String),
    #[error("amount out of range: {0:?}")]
    OutOfRange(String),
}

fn currency_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)usd").expect("invalid currency regex"))
}

/// Parse a signed dollar amount such as `$1,200.00`, `-$8.50`, `- 3.25 USD`,
/// `12.00-` or `(45.10)`.
///
/// Currency symbols, the `USD` code, thousands separators and whitespace are
/// dropped. One sign is allowed, leading or trailing; accounting parentheses
/// also mean negative.
pub fn normalize_amount(raw: &str) -> Result<f64, AmountError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (s, parenthesized) = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (inner, true),
        None => (s, false),
    };

    let cleaned: String = currency_code_re()
        .replace_all(s, "")
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    let signs = cleaned.chars().filter(|c| matches!(c, '-' | '+')).count();
    if signs > 1 || (signs == 1 && parenthesized) {
        return Err(AmountError::MultipleSigns(raw.to_string()));
    }

    let (body, negative) = if let Some(rest) = cleaned.strip_prefix('-') {
        (rest, true)
    } else if let Some(rest) = cleaned.strip_suffix('-') {
        (rest, true)
    } else if let Some(rest) = cleaned.strip_prefix('+').or_else(|| cleaned.strip_suffix('+')) {
        (rest, false)
    } else {
        (cleaned.as_str(), parenthesized)
    };

    if body.chars().filter(|c| *c == '.').count() > 1 {
        return Err(AmountError::MultipleDecimalPoints(raw.to_string()));
    }
    if body.chars().any(|c| !c.is_ascii_digit() && c != '.') {
        return Err(AmountError::InvalidCharacters(raw.to_string()));
    }
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return Err(AmountError::NoDigits(raw.to_string()));
    }

    let value: f64 = body
        .parse()
        .map_err(|_| AmountError::InvalidCharacters(raw.to_string()))?;
    if !value.is_finite() {
        return Err(AmountError::OutOfRange(raw.to_string()));
    }
    Ok(if negative { -value } else { value })
}
