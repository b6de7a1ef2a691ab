use crate::models::Week;
use chrono::{Datelike, NaiveDate};

const MONTH_LABELS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}

/// One entry per week: the month name on the first week whose first day
/// falls in that month, `None` elsewhere. Each month name is used at most
/// once, so a window wrapping round to the same month keeps the earlier label.
pub fn month_labels(weeks: &[Week]) -> Vec<Option<&'static str>> {
    let mut seen = [false; 12];
    weeks
        .iter()
        .map(|week| {
            let first = week.first()?;
            let month = first.date.month0() as usize;
            if seen[month] {
                return None;
            }
            seen[month] = true;
            Some(MONTH_LABELS[month])
        })
        .collect()
}

/// Month of the first and of the last day present.
pub fn month_span(weeks: &[Week]) -> Option<(&'static str, &'static str)> {
    let first = weeks.iter().flatten().next()?;
    let last = weeks.iter().rev().flat_map(|week| week.iter().rev()).next()?;
    Some((month_label(first.date), month_label(last.date)))
}

pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
