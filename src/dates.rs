use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

/// Two-digit years below this value land in the 2000s, the rest in the 1900s
/// (`23` -> 2023, `69` -> 1969). Never depends on the current date.
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("empty date")]
    Empty,
    #[error("no date found in {0:?}")]
    Unrecognized(String),
    #[error("ambiguous date {0:?}")]
    Ambiguous(String),
    #[error("impossible calendar date {0:?}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    Ymd,
    Mdy,
}

fn strict_formats() -> &'static [(Regex, FieldOrder)] {
    static FORMATS: OnceLock<Vec<(Regex, FieldOrder)>> = OnceLock::new();
    FORMATS.get_or_init(|| {
        [
            // ISO date, optionally followed by a time and offset
            (
                r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$",
                FieldOrder::Ymd,
            ),
            (r"^(\d{4})/(\d{1,2})/(\d{1,2})$", FieldOrder::Ymd),
            (r"^(\d{4})(\d{2})(\d{2})$", FieldOrder::Ymd),
            (r"^(\d{1,2})/(\d{1,2})/(\d{4})$", FieldOrder::Mdy),
            (r"^(\d{1,2})-(\d{1,2})-(\d{4})$", FieldOrder::Mdy),
        ]
        .into_iter()
        .map(|(pattern, order)| (Regex::new(pattern).expect("invalid date regex"), order))
        .collect()
    })
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\.\d+)?(?:\s*(?:Z|UTC|GMT|[+-]\d{2}:?\d{2}))?)|(?P<num>\d+)|(?P<word>[a-z]+)")
            .expect("invalid date token regex")
    })
}

fn month_from_name(word: &str) -> Option<u32> {
    let month = match word.to_ascii_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Resolve a year token. Four digits are taken literally; one or two digits
/// go through the fixed pivot. Anything else is not a year.
fn expand_year(token: &str) -> Option<i32> {
    let value: i32 = token.parse().ok()?;
    match token.len() {
        4 => Some(value),
        1 | 2 if value < TWO_DIGIT_YEAR_PIVOT => Some(2000 + value),
        1 | 2 => Some(1900 + value),
        _ => None,
    }
}

fn looks_like_year(token: &str) -> bool {
    token.len() == 4 || token.parse::<u32>().map_or(false, |v| v > 31)
}

fn parse_strict(raw: &str) -> Option<NaiveDate> {
    for (re, order) in strict_formats() {
        let Some(caps) = re.captures(raw) else {
            continue;
        };
        let fields: Vec<u32> = (1..=3)
            .filter_map(|i| caps.get(i).and_then(|m| m.as_str().parse().ok()))
            .collect();
        let [a, b, c] = fields[..] else {
            return None;
        };
        let (y, m, d) = match order {
            FieldOrder::Ymd => (a, b, c),
            FieldOrder::Mdy => (c, a, b),
        };
        // A strict shape with an impossible value still gets a fuzzy pass,
        // which knows how to read day-first dates like 13/01/2023.
        return NaiveDate::from_ymd_opt(y as i32, m, d);
    }
    None
}

fn parse_fuzzy(raw: &str) -> Result<NaiveDate, DateError> {
    let ambiguous = || DateError::Ambiguous(raw.to_string());
    let unrecognized = || DateError::Unrecognized(raw.to_string());

    let mut month_name: Option<u32> = None;
    let mut numbers: Vec<&str> = Vec::new();
    for caps in token_re().captures_iter(raw) {
        if let Some(num) = caps.name("num") {
            if num.as_str().len() > 4 {
                return Err(unrecognized());
            }
            numbers.push(num.as_str());
        } else if let Some(word) = caps.name("word") {
            if let Some(m) = month_from_name(word.as_str()) {
                if month_name.is_some() {
                    return Err(ambiguous());
                }
                month_name = Some(m);
            }
            // Any other word (weekday, ordinal suffix, filler) is ignored.
        }
        // Clock times carry no date information.
    }

    let (year, month, day) = match month_name {
        Some(month) => {
            let (day, year) = match numbers[..] {
                [] => return Err(unrecognized()),
                [_] => return Err(ambiguous()),
                [a, b] => match (looks_like_year(a), looks_like_year(b)) {
                    (true, true) => return Err(ambiguous()),
                    (true, false) => (b, a),
                    _ => (a, b),
                },
                _ => return Err(ambiguous()),
            };
            let day: u32 = day.parse().map_err(|_| unrecognized())?;
            (year, month, day)
        }
        None => {
            let [a, b, c] = numbers[..] else {
                return Err(if numbers.is_empty() { unrecognized() } else { ambiguous() });
            };
            if a.len() == 4 {
                let month: u32 = b.parse().map_err(|_| unrecognized())?;
                let day: u32 = c.parse().map_err(|_| unrecognized())?;
                (a, month, day)
            } else {
                let first: u32 = a.parse().map_err(|_| unrecognized())?;
                let second: u32 = b.parse().map_err(|_| unrecognized())?;
                if first > 12 && second <= 12 {
                    (c, second, first)
                } else {
                    (c, first, second)
                }
            }
        }
    };

    let year = expand_year(year).ok_or_else(unrecognized)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::Invalid(raw.to_string()))
}

/// Parse a transaction date written in any of the formats seen in bank exports.
///
/// Unambiguous numeric layouts (`2023-01-01`, `01/01/2023`, `2023/01/01`,
/// `20230101`) are tried first. Anything else goes through a fuzzy scan that
/// picks a month name and day/year numbers out of free text such as
/// `"Jan 1st 23"` or `"paid on July 2nd, 2023"`, ignoring unrelated words.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, DateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateError::Empty);
    }
    if let Some(date) = parse_strict(raw) {
        return Ok(date);
    }
    parse_fuzzy(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(normalize_date("2023-01-01"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("  2023-02-15  "), Ok(ymd(2023, 2, 15)));
    }

    #[test]
    fn test_iso_datetime_drops_time() {
        assert_eq!(normalize_date("2023-01-01T10:30:00"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("2023-01-01 23:59"), Ok(ymd(2023, 1, 1)));
    }

    #[test]
    fn test_us_format() {
        assert_eq!(normalize_date("01/01/2023"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("12/31/2022"), Ok(ymd(2022, 12, 31)));
        assert_eq!(normalize_date("7-4-2023"), Ok(ymd(2023, 7, 4)));
    }

    #[test]
    fn test_other_numeric_formats() {
        assert_eq!(normalize_date("2023/03/05"), Ok(ymd(2023, 3, 5)));
        assert_eq!(normalize_date("20230305"), Ok(ymd(2023, 3, 5)));
    }

    #[test]
    fn test_human_readable() {
        assert_eq!(normalize_date("Jan 1st 23"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("July 2nd, 2023"), Ok(ymd(2023, 7, 2)));
        assert_eq!(normalize_date("3 March 2023"), Ok(ymd(2023, 3, 3)));
        assert_eq!(normalize_date("2023 Sept 14"), Ok(ymd(2023, 9, 14)));
    }

    #[test]
    fn test_fuzzy_ignores_stray_tokens() {
        assert_eq!(normalize_date("paid on Monday, Feb 3rd 2023 at 10:15"), Ok(ymd(2023, 2, 3)));
        assert_eq!(normalize_date("posted: 02/03/2023 (pending)"), Ok(ymd(2023, 2, 3)));
    }

    #[test]
    fn test_fuzzy_ignores_timezone_offsets() {
        assert_eq!(normalize_date("Sat, 01 Jan 2023 00:00:00 +0000"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("Jan 1 2023 10:30 -0500"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("Jan 1 2023 10:30:15 +05:30"), Ok(ymd(2023, 1, 1)));
        assert_eq!(normalize_date("Tue, 14 Feb 2023 08:00 GMT"), Ok(ymd(2023, 2, 14)));
    }

    #[test]
    fn test_format_invariance() {
        let expected = normalize_date("2023-01-01").unwrap();
        for raw in ["01/01/2023", "Jan 1st 23", "January 1, 2023", "2023/01/01", "1 jan 2023"] {
            assert_eq!(normalize_date(raw), Ok(expected), "{raw}");
        }
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(normalize_date("Jan 1 00"), Ok(ymd(2000, 1, 1)));
        assert_eq!(normalize_date("Jan 1 68"), Ok(ymd(2068, 1, 1)));
        assert_eq!(normalize_date("Jan 1 69"), Ok(ymd(1969, 1, 1)));
        assert_eq!(normalize_date("Jan 1 99"), Ok(ymd(1999, 1, 1)));
        assert_eq!(normalize_date("1/2/23"), Ok(ymd(2023, 1, 2)));
    }

    #[test]
    fn test_day_first_when_month_impossible() {
        assert_eq!(normalize_date("13/01/2023"), Ok(ymd(2023, 1, 13)));
    }

    #[test]
    fn test_malformed_dates_fail() {
        assert!(matches!(normalize_date("not a date"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize_date("INVALID DATE"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize_date("13/45/2023"), Err(DateError::Invalid(_))));
        assert!(matches!(normalize_date("02/30/2025"), Err(DateError::Invalid(_))));
    }

    #[test]
    fn test_no_default_fill_in() {
        // Missing year or day must not be guessed.
        assert!(matches!(normalize_date("Jan 5"), Err(DateError::Ambiguous(_))));
        assert!(matches!(normalize_date("January 2023"), Err(DateError::Ambiguous(_))));
        assert!(matches!(normalize_date("March"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize_date("01/02"), Err(DateError::Ambiguous(_))));
    }

    #[test]
    fn test_conflicting_tokens_fail() {
        assert!(matches!(normalize_date("Jan Feb 1 2023"), Err(DateError::Ambiguous(_))));
        assert!(matches!(normalize_date("Jan 1 2 2023"), Err(DateError::Ambiguous(_))));
        assert!(matches!(normalize_date("Jan 2023 2024"), Err(DateError::Ambiguous(_))));
        assert!(matches!(normalize_date("1/2/345"), Err(DateError::Unrecognized(_))));
        assert!(matches!(normalize_date("ref 123456"), Err(DateError::Unrecognized(_))));
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_date(""), Err(DateError::Empty));
        assert_eq!(normalize_date("   "), Err(DateError::Empty));
    }
}
