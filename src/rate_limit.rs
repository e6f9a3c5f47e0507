//! Sliding-window rate limiter
//!
//! Tracks request timestamps per (user, action type) key and enforces
//! the quota table from [`crate::config`]. The window slides with the
//! clock rather than resetting on fixed boundaries, so there are no
//! burst-through moments at bucket edges.
//!
//! Failure policy is deliberately asymmetric: if the limiter itself
//! breaks (a poisoned lock), admission fails open while quota reporting
//! fails closed. Over-blocking a legitimate user is judged worse than
//! an occasional missed throttle.

use log::error;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Mutex;
use std::time::Instant;

use crate::config::QuotaConfig;

/// Kinds of user action the bot throttles independently
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    EmotionEntry,
    SummaryRequest,
    ExportRequest,
    GeneralCommand,
    Message,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::EmotionEntry,
        ActionType::SummaryRequest,
        ActionType::ExportRequest,
        ActionType::GeneralCommand,
        ActionType::Message,
    ];

    /// Map a dispatcher label to an action type. Unrecognized labels
    /// degrade to the general-command quota instead of erroring.
    pub fn from_label(label: &str) -> Self {
        match label {
            "emotion_entry" => ActionType::EmotionEntry,
            "summary_request" => ActionType::SummaryRequest,
            "export_request" => ActionType::ExportRequest,
            "message" => ActionType::Message,
            _ => ActionType::GeneralCommand,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ActionType::EmotionEntry => "emotion_entry",
            ActionType::SummaryRequest => "summary_request",
            ActionType::ExportRequest => "export_request",
            ActionType::GeneralCommand => "general_command",
            ActionType::Message => "message",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monitoring counters over the limiter's key table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterStats {
    /// Keys ever seen and still stored
    pub tracked_keys: usize,
    /// Keys whose window currently holds at least one timestamp
    pub active_keys: usize,
}

type WindowKey = (i64, ActionType);

/// Process-wide rate limiter shared by every concurrent request.
///
/// One ordered timestamp window per (user, action) key, created lazily
/// on first use. A single mutex guards the whole map; check-and-record
/// is atomic per call, closing the check-then-act race between
/// simultaneous requests for the same key.
pub struct RateLimiter {
    quotas: QuotaConfig,
    state: Mutex<HashMap<WindowKey, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter with the built-in default quotas
    pub fn new() -> Self {
        Self::with_quotas(QuotaConfig::default())
    }

    /// Create a limiter with an explicit quota table
    pub fn with_quotas(quotas: QuotaConfig) -> Self {
        Self {
            quotas,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether the user may perform the action right now and, if
    /// so, record it. Denied requests are not recorded.
    ///
    /// Fails open: an internal limiter failure admits the request.
    pub fn is_allowed(&self, user_id: i64, action: ActionType) -> bool {
        self.is_allowed_at(user_id, action, Instant::now())
    }

    fn is_allowed_at(&self, user_id: i64, action: ActionType, now: Instant) -> bool {
        let quota = self.quotas.quota(action);

        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Rate limiter state poisoned, allowing request: {e}");
                return true;
            }
        };

        let window = state.entry((user_id, action)).or_default();
        purge_expired(window, now, quota.window());

        if window.len() >= quota.max_requests as usize {
            return false;
        }

        window.push_back(now);
        true
    }

    /// Number of requests the user has left for the action within the
    /// current window. Does not record anything.
    ///
    /// Fails closed: an internal limiter failure reports 0.
    pub fn remaining_quota(&self, user_id: i64, action: ActionType) -> u32 {
        self.remaining_quota_at(user_id, action, Instant::now())
    }

    fn remaining_quota_at(&self, user_id: i64, action: ActionType, now: Instant) -> u32 {
        let quota = self.quotas.quota(action);

        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Rate limiter state poisoned, reporting zero quota: {e}");
                return 0;
            }
        };

        let Some(window) = state.get_mut(&(user_id, action)) else {
            return quota.max_requests;
        };
        purge_expired(window, now, quota.window());

        quota.max_requests.saturating_sub(window.len() as u32)
    }

    /// Remaining quota for every action type, for user-facing quota
    /// summaries
    pub fn quota_snapshot(&self, user_id: i64) -> Vec<(ActionType, u32)> {
        ActionType::ALL
            .into_iter()
            .map(|action| (action, self.remaining_quota(user_id, action)))
            .collect()
    }

    /// Drop every stored window for one user across all action types.
    /// Administrative override; other users are untouched.
    pub fn reset_user_limits(&self, user_id: i64) {
        match self.state.lock() {
            Ok(mut state) => {
                state.retain(|(uid, _), _| *uid != user_id);
            }
            Err(e) => {
                error!("Rate limiter state poisoned, reset skipped: {e}");
            }
        }
    }

    /// Drop windows that hold no live timestamps. Call periodically to
    /// reclaim memory for users who went quiet.
    pub fn purge_idle(&self) {
        let now = Instant::now();
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Rate limiter state poisoned, idle purge skipped: {e}");
                return;
            }
        };

        state.retain(|(_, action), window| {
            purge_expired(window, now, self.quotas.quota(*action).window());
            !window.is_empty()
        });
    }

    /// Counters for monitoring the size of the key table
    pub fn stats(&self) -> LimiterStats {
        match self.state.lock() {
            Ok(state) => LimiterStats {
                tracked_keys: state.len(),
                active_keys: state.values().filter(|w| !w.is_empty()).count(),
            },
            Err(e) => {
                error!("Rate limiter state poisoned, stats unavailable: {e}");
                LimiterStats { tracked_keys: 0, active_keys: 0 }
            }
        }
    }

    /// Quota table this limiter enforces
    pub fn quotas(&self) -> &QuotaConfig {
        &self.quotas
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim the expired prefix of one window. Timestamps are appended in
/// order, so everything strictly older than `now - window` sits at the
/// front.
fn purge_expired(window: &mut VecDeque<Instant>, now: Instant, span: std::time::Duration) {
    // Instants early in process lifetime can predate now - span
    let Some(cutoff) = now.checked_sub(span) else {
        return;
    };
    while window.front().is_some_and(|&t| t < cutoff) {
        window.pop_front();
    }
}
