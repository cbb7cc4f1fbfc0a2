//! Display formatting for money, rates, durations and timestamps, plus the
//! inverse for optional form inputs.

use chrono::{DateTime, NaiveDate, Utc};

/// Fixed two-decimal dollars with thousands separators: `$1,234.56`.
/// Negative amounts render as `-$12.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Whole number with thousands separators: `12,480`.
pub fn format_count(n: u64) -> String {
    group_thousands(n)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A rate already expressed in percent, one decimal place: `42.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Minutes as `45m`, or `2h 5m` from an hour up.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    if total < 60 {
        format!("{total}m")
    } else {
        format!("{}h {}m", total / 60, total % 60)
    }
}

/// Days to one decimal place: `3.5 days`.
pub fn format_days(days: f64) -> String {
    format!("{days:.1} days")
}

/// `Jan 20, 2026`, or `-` when the date is absent.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "-".to_string(),
    }
}

/// `Jan 20, 2026 9:35 PM` in UTC.
pub fn format_datetime(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => "-".to_string(),
    }
}

/// snake_case to Title Case: `in_progress` becomes `In Progress`.
pub fn format_snake_case_title(s: &str) -> String {
    s.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Optional amount as currency, or a dash.
pub fn format_optional_currency(amount: Option<f64>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "-".to_string())
}

/// Optional numeric form field. Blank or unparseable input is `None`.
pub fn parse_optional_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Optional `YYYY-MM-DD` date field.
pub fn parse_optional_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
