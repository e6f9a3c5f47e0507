//! Security event logging
//!
//! Fire-and-forget telemetry for policy violations, emitted through
//! the `log` facade under the `security` target. Callers are never
//! influenced by these functions; the receiving sink is whatever
//! logger the host process installed.

use log::{error, warn};

use crate::rate_limit::ActionType;

/// Most characters of offending content echoed into a log line
const EXCERPT_LEN: usize = 100;

/// Report a denied request.
pub fn rate_limit_exceeded(user_id: i64, action: ActionType) {
    warn!(target: "security", "Rate limit exceeded - user: {user_id}, action: {action}");
}

/// Report flagged spam with a bounded content excerpt.
pub fn spam_detected(user_id: i64, content: &str) {
    warn!(
        target: "security",
        "Spam detected - user: {user_id}, content: {}",
        excerpt(content)
    );
}

/// Report a failed field validation. `data_type` names the field
/// abstractly; `detail` must not echo unsanitized content.
pub fn invalid_data(user_id: i64, data_type: &str, detail: &str) {
    warn!(
        target: "security",
        "Invalid data - user: {user_id}, type: {data_type}, detail: {detail}"
    );
}

/// Report a suspected injection attempt. Logged at error level: these
/// are deliberate attacks, not sloppy input.
pub fn injection_attempt(user_id: i64, content: &str) {
    error!(
        target: "security",
        "Injection attempt - user: {user_id}, content: {}",
        excerpt(content)
    );
}

fn excerpt(content: &str) -> &str {
    match content.char_indices().nth(EXCERPT_LEN) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}
