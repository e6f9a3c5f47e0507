//! Time-of-day format validation

use regex::Regex;
use std::sync::LazyLock;

static TIME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

/// Validate an HH:MM time string. Hours may drop the leading zero;
/// minutes may not.
pub fn validate_time_format(time: &str) -> bool {
    TIME_FORMAT.is_match(time)
}
