//! Shared formatting utilities for list rows, recaps and the console.
//!
//! Date helpers accept any timestamp the backend emits (`2026-01-20`,
//! `2026-01-20T21:35:00Z`, `2026-01-20 21:35:00`) and fall back to the raw
//! text when it does not parse.

use shared_types::{parse_date, parse_timestamp};

/// Format a date string as "Jan 20, 2026".
pub fn format_date_human(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Format a timestamp as "Jan 20, 2026 9:35 PM".
///
/// Date-only input yields the date alone.
pub fn format_datetime_human(date_str: &str) -> String {
    if date_str.trim().len() <= 10 {
        return format_date_human(date_str);
    }
    match parse_timestamp(date_str) {
        Some(dt) => dt.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => format_date_human(date_str),
    }
}

/// Whole pesos with thousands separators, e.g. `₱ 35,000`.
pub fn format_peso(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("₱ {}", grouped)
}

/// Capitalize a service key for display when the catalog has no name for it
/// (e.g. "birthday" → "Birthday").
pub fn format_service_key(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
