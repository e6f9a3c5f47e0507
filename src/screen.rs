//! Inbound message screening
//!
//! Runs the whole safety pipeline for one incoming message: message
//! quota, spam heuristics, then sanitization. The dispatcher calls
//! this once per update and drops anything that does not pass.

use std::sync::Arc;

use crate::events;
use crate::rate_limit::{ActionType, RateLimiter};
use crate::sanitizer::sanitize_input;
use crate::spam::detect_spam_patterns;

/// Default length bound applied to screened message text
const DEFAULT_MAX_LENGTH: usize = 1000;

/// Per-action view of a user's current standing against the quota
/// table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionUsage {
    pub action: ActionType,
    pub remaining: u32,
    pub limit: u32,
    pub window_secs: u64,
}

/// Screens inbound messages against a shared rate limiter.
///
/// Violations are reported through [`crate::events`]; the verdict
/// itself is advisory and enforcement stays with the caller.
pub struct MessageScreen {
    limiter: Arc<RateLimiter>,
    max_length: usize,
}

impl MessageScreen {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            limiter,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_length(limiter: Arc<RateLimiter>, max_length: usize) -> Self {
        Self { limiter, max_length }
    }

    /// Run one message through quota, spam, and sanitization checks.
    ///
    /// Returns the sanitized text when the message may be processed,
    /// or `None` when the caller should drop the update.
    pub fn screen_message(&self, user_id: i64, text: &str) -> Option<String> {
        if !self.limiter.is_allowed(user_id, ActionType::Message) {
            events::rate_limit_exceeded(user_id, ActionType::Message);
            return None;
        }

        if detect_spam_patterns(text) {
            events::spam_detected(user_id, text);
            return None;
        }

        Some(sanitize_input(text, self.max_length))
    }

    /// Current usage for every action type, for user-facing quota
    /// summaries.
    pub fn user_stats(&self, user_id: i64) -> Vec<ActionUsage> {
        self.limiter
            .quota_snapshot(user_id)
            .into_iter()
            .map(|(action, remaining)| {
                let quota = self.limiter.quotas().quota(action);
                ActionUsage {
                    action,
                    remaining,
                    limit: quota.max_requests,
                    window_secs: quota.window_secs,
                }
            })
            .collect()
    }

    /// Shared limiter backing this screen
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Quota, QuotaConfig};

    fn screen_with_message_quota(max_requests: u32) -> MessageScreen {
        let mut quotas = QuotaConfig::default();
        quotas.message = Quota { max_requests, window_secs: 60 };
        MessageScreen::new(Arc::new(RateLimiter::with_quotas(quotas)))
    }

    #[test]
    fn test_clean_message_passes_sanitized() {
        let screen = screen_with_message_quota(5);
        let out = screen.screen_message(7, "  felt   calm today  ");
        assert_eq!(out.as_deref(), Some("felt calm today"));
    }

    #[test]
    fn test_spam_is_dropped() {
        let screen = screen_with_message_quota(5);
        assert_eq!(screen.screen_message(7, "click here https://spam.example"), None);
    }

    #[test]
    fn test_quota_exhaustion_drops_messages() {
        let screen = screen_with_message_quota(2);
        assert!(screen.screen_message(7, "first entry today").is_some());
        assert!(screen.screen_message(7, "second entry today").is_some());
        assert!(screen.screen_message(7, "third entry today").is_none());
        // Another user is unaffected
        assert!(screen.screen_message(8, "first entry today").is_some());
    }

    #[test]
    fn test_user_stats_reflect_usage() {
        let screen = screen_with_message_quota(5);
        screen.screen_message(7, "hello there friend");

        let stats = screen.user_stats(7);
        let message = stats.iter().find(|u| u.action == ActionType::Message).unwrap();
        assert_eq!(message.limit, 5);
        assert_eq!(message.remaining, 4);
        assert_eq!(message.window_secs, 60);
    }
}
