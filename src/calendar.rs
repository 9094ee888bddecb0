use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One rolling month or quarter window used for forward-looking projections.
/// Ephemeral: generated per run from an injected "today", never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Standard interval overlap against an inclusive [start, end] range.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

const START_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Parse a planned start date. Accepts M/D/YYYY (with or without zero
/// padding) and ISO dates; anything else yields None and the owning project
/// is excluded from period matching.
pub fn parse_start_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    START_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Parse an end-quarter string like "2027, Q1" or "2027 Q1" (flexible
/// space/comma separators) into the last calendar day of that quarter.
/// Quarters outside 1-4 and non-matching strings yield None.
pub fn parse_end_quarter(input: &str) -> Option<NaiveDate> {
    let mut chars = input.trim().chars().peekable();

    let mut year_digits = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            year_digits.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    if year_digits.len() != 4 {
        return None;
    }
    let year: i32 = year_digits.parse().ok()?;

    let mut separators = 0;
    while let Some(c) = chars.peek() {
        if *c == ',' || c.is_whitespace() {
            separators += 1;
            chars.next();
        } else {
            break;
        }
    }
    if separators == 0 {
        return None;
    }

    if chars.next() != Some('Q') {
        return None;
    }
    let quarter = chars.next()?.to_digit(10)?;
    if !(1..=4).contains(&quarter) {
        return None;
    }

    let end_month = quarter * 3;
    Some(last_day_of_month(year, end_month))
}

/// The next `count` calendar months starting from the first day of today's
/// month (offsets 0, +1, +2, ...), each spanning the full month inclusive.
pub fn upcoming_months(today: NaiveDate, count: usize) -> Vec<Period> {
    (0..count)
        .map(|offset| {
            let month0 = today.month0() as usize + offset;
            let year = today.year() + (month0 / 12) as i32;
            let month = (month0 % 12) as u32 + 1;
            let start = NaiveDate::from_ymd_opt(year, month, 1)
                .expect("first day of month is always valid");
            Period {
                label: start.format("%b %Y").to_string(),
                start,
                end: last_day_of_month(year, month),
            }
        })
        .collect()
}

/// The next `count` calendar quarters starting from today's quarter
/// (offsets 0, +1, +2, ...), labelled "<year> Q<n>".
pub fn upcoming_quarters(today: NaiveDate, count: usize) -> Vec<Period> {
    let current_quarter = today.month0() / 3;
    (0..count)
        .map(|offset| {
            let quarter0 = current_quarter as usize + offset;
            let year = today.year() + (quarter0 / 4) as i32;
            let quarter = (quarter0 % 4) as u32 + 1;
            let start_month = (quarter - 1) * 3 + 1;
            let start = NaiveDate::from_ymd_opt(year, start_month, 1)
                .expect("first day of quarter is always valid");
            Period {
                label: format!("{year} Q{quarter}"),
                start,
                end: last_day_of_month(year, start_month + 2),
            }
        })
        .collect()
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first day of month is always valid")
        .pred_opt()
        .expect("month start has a predecessor")
}
