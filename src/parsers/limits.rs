// src/parsers/limits.rs

//! Time and memory limit normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};

static TIME_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(milliseconds?|msecs?|ms|seconds?|secs?|s)(?-u:\b)")
        .expect("time limit regex is valid")
});

static MEMORY_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(gigabytes?|gib|gb|megabytes?|mib|mb|m|kilobytes?|kib|kb)(?-u:\b)",
    )
    .expect("memory limit regex is valid")
});

/// Find the first time limit in `text` and return it in milliseconds.
///
/// `"2 secs"` becomes `2000`, `"1.5 seconds"` becomes `1500`, `"500 ms"` stays `500`.
pub fn parse_time_limit_ms(text: &str) -> Result<u64> {
    let caps = TIME_LIMIT
        .captures(text)
        .ok_or_else(|| AppError::extraction("time limit", format!("no duration in '{}'", text.trim())))?;
    let value = parse_number("time limit", &caps[1])?;
    let unit = caps[2].to_lowercase();

    let ms = if unit.starts_with("ms") || unit.starts_with("milli") {
        value
    } else {
        value * 1000.0
    };
    positive("time limit", ms.round())
}

/// Find the first memory limit in `text` and return it in megabytes.
pub fn parse_memory_limit_mb(text: &str) -> Result<u64> {
    let caps = MEMORY_LIMIT
        .captures(text)
        .ok_or_else(|| AppError::extraction("memory limit", format!("no size in '{}'", text.trim())))?;
    let value = parse_number("memory limit", &caps[1])?;
    let unit = caps[2].to_lowercase();

    let mb = if unit.starts_with('g') {
        value * 1024.0
    } else if unit.starts_with('k') {
        (value / 1024.0).ceil()
    } else {
        value
    };
    positive("memory limit", mb.round())
}

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| AppError::extraction(field, format!("'{raw}': {e}")))
}

fn positive(field: &str, value: f64) -> Result<u64> {
    if value >= 1.0 {
        Ok(value as u64)
    } else {
        Err(AppError::extraction(field, format!("{value} is not positive")))
    }
}
