use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEEKS: u32 = 26;
pub const MIN_WEEKS: u32 = 1;
pub const MAX_WEEKS: u32 = 53;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub count: u64,
    pub level: u8,
}

pub type Week = Vec<Day>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsResponse {
    pub total_contributions: u64,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Raw query string of `GET /api/contributions`. Values are kept as strings
/// so malformed input surfaces as a JSON client error instead of an extractor
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsQuery {
    pub username: Option<String>,
    pub weeks: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Which slice of the calendar a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// The `n` most recent week-buckets of the full calendar.
    Recent(u32),
    /// An explicit inclusive date range.
    Range { start: NaiveDate, end: NaiveDate },
}

pub fn clamp_weeks(weeks: i64) -> u32 {
    weeks.clamp(i64::from(MIN_WEEKS), i64::from(MAX_WEEKS)) as u32
}

/// Parses a week count, clamping into range. Integers too large for `i64`
/// saturate instead of being rejected.
pub fn parse_weeks(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(weeks) = raw.parse::<i64>() {
        return Some(clamp_weeks(weeks));
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { MIN_WEEKS } else { MAX_WEEKS })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_weeks_pins_out_of_range_values() {
        assert_eq!(clamp_weeks(0), 1);
        assert_eq!(clamp_weeks(-4), 1);
        assert_eq!(clamp_weeks(100), 53);
        assert_eq!(clamp_weeks(26), 26);
    }

    #[test]
    fn parse_weeks_saturates_on_overflow() {
        assert_eq!(parse_weeks("12"), Some(12));
        assert_eq!(parse_weeks("99999999999999999999"), Some(53));
        assert_eq!(parse_weeks("+99999999999999999999"), Some(53));
        assert_eq!(parse_weeks("-99999999999999999999"), Some(1));
        assert_eq!(parse_weeks("12.5"), None);
        assert_eq!(parse_weeks("-"), None);
    }

    #[test]
    fn response_uses_camel_case_and_iso_dates() {
        let response = ContributionsResponse {
            total_contributions: 5,
            weeks: vec![vec![Day {
                date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
                count: 5,
                level: 2,
            }]],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "totalContributions": 5,
                "weeks": [[{ "date": "2024-07-04", "count": 5, "level": 2 }]]
            })
        );
    }
}
