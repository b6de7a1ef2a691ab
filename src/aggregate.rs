use crate::errors::AggregateError;
use crate::models::{
    parse_weeks, ContributionsQuery, ContributionsResponse, Day, Week, Window, DEFAULT_WEEKS,
};
use crate::upstream::Calendar;
use chrono::{Months, NaiveDate};

/// Validated form of a contributions request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    pub username: String,
    pub window: Window,
}

impl CalendarRequest {
    /// Date range to send upstream, if any.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.window {
            Window::Range { start, end } => Some((start, end)),
            Window::Recent(_) => None,
        }
    }
}

pub fn resolve_request(
    query: &ContributionsQuery,
    today: NaiveDate,
) -> Result<CalendarRequest, AggregateError> {
    let username = non_blank(&query.username)
        .ok_or_else(|| AggregateError::InvalidInput("username is required".to_string()))?
        .to_string();

    let window = match non_blank(&query.start_date) {
        Some(start) => {
            let start = parse_date("startDate", start)?;
            let end = match non_blank(&query.end_date) {
                Some(end) => parse_date("endDate", end)?,
                None => today,
            };
            if start > end {
                return Err(AggregateError::InvalidInput(
                    "startDate must not be after endDate".to_string(),
                ));
            }
            if start
                .checked_add_months(Months::new(12))
                .is_some_and(|limit| end >= limit)
            {
                return Err(AggregateError::InvalidInput(
                    "date range must not exceed one year".to_string(),
                ));
            }
            Window::Range { start, end }
        }
        None => {
            let weeks = match non_blank(&query.weeks) {
                Some(raw) => parse_weeks(raw).ok_or_else(|| {
                    AggregateError::InvalidInput("weeks must be an integer".to_string())
                })?,
                None => DEFAULT_WEEKS,
            };
            Window::Recent(weeks)
        }
    };

    Ok(CalendarRequest { username, window })
}

/// Normalizes levels, windows the calendar and re-sums the total over the
/// returned days.
pub fn shape_calendar(calendar: Calendar, window: Window) -> ContributionsResponse {
    let mut weeks: Vec<Week> = calendar
        .weeks
        .into_iter()
        .map(|week| {
            week.contribution_days
                .into_iter()
                .map(|day| Day {
                    date: day.date,
                    count: day.contribution_count,
                    level: day.contribution_level.ordinal(),
                })
                .collect::<Week>()
        })
        .filter(|week| !week.is_empty())
        .collect();

    if let Window::Recent(count) = window {
        let keep = count as usize;
        if weeks.len() > keep {
            weeks.drain(..weeks.len() - keep);
        }
    }

    let total_contributions = weeks
        .iter()
        .flatten()
        .fold(0u64, |acc, day| acc.saturating_add(day.count));

    ContributionsResponse {
        total_contributions,
        weeks,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AggregateError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AggregateError::InvalidInput(format!("{field} must be YYYY-MM-DD")))
}
