//! Timezone name validation

use chrono_tz::Tz;

/// Validate a timezone name against the IANA database. Anything the
/// database does not know, including lookup failures, is invalid.
pub fn validate_timezone(name: &str) -> bool {
    name.parse::<Tz>().is_ok()
}
