//! User settings validation

use serde_json::Value;

use super::time::validate_time_format;

const VALID_FREQUENCIES: [&str; 3] = ["normal", "reduced", "minimal"];

/// Most daily ping times a user may configure
const MAX_PING_TIMES: usize = 10;

/// Validate a partial settings update.
///
/// Every key present in the payload is checked against its own rule;
/// absent keys are ignored rather than defaulted or rejected. The
/// first failing key fails the whole payload.
pub fn validate_user_settings(settings: &Value) -> bool {
    let Some(settings) = settings.as_object() else {
        return false;
    };

    if let Some(frequency) = settings.get("notification_frequency") {
        let Some(frequency) = frequency.as_str() else {
            return false;
        };
        if !VALID_FREQUENCIES.contains(&frequency) {
            return false;
        }
    }

    if let Some(weekend) = settings.get("weekend_notifications") {
        if !weekend.is_boolean() {
            return false;
        }
    }

    if let Some(times) = settings.get("daily_ping_times") {
        let Some(times) = times.as_array() else {
            return false;
        };
        if times.len() > MAX_PING_TIMES {
            return false;
        }
        for time in times {
            let Some(time) = time.as_str() else {
                return false;
            };
            if !validate_time_format(time) {
                return false;
            }
        }
    }

    if let Some(summary_time) = settings.get("weekly_summary_time") {
        let Some(summary_time) = summary_time.as_str() else {
            return false;
        };
        if !validate_time_format(summary_time) {
            return false;
        }
    }

    if let Some(day) = settings.get("weekly_summary_day") {
        let Some(day) = day.as_i64() else {
            return false;
        };
        if !(0..=6).contains(&day) {
            return false;
        }
    }

    if let Some(days) = settings.get("data_retention_days") {
        let Some(days) = days.as_i64() else {
            return false;
        };
        if !(30..=3650).contains(&days) {
            return false;
        }
    }

    true
}
