//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{Days, NaiveDate};

/// Parse a target day as either a calendar date or a day offset.
///
/// Supports:
/// - Calendar date: "2026-01-15"
/// - Offset from `today`: "0", "-1" (yesterday), "+2"
pub fn parse_target_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Ok(offset) = s.parse::<i64>() else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2026-01-15) or a day offset (e.g., -1)"
        );
    };

    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset < 0 {
        today.checked_sub_days(days)
    } else {
        today.checked_add_days(days)
    };
    shifted.with_context(|| format!("Day offset out of range: {offset}"))
}

/// Trims entries, drops blanks and keeps the first occurrence of each.
pub fn dedup_list(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}
