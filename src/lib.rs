//! emotion-guard - Input-safety boundary for an emotion-journal bot
//!
//! Sanitizes untrusted free text, validates structured entry fields,
//! throttles per-user usage with sliding windows, and flags spam.
//! Every check is advisory: callers get booleans and quota counts and
//! decide enforcement themselves.

pub mod config;
pub mod events;
pub mod rate_limit;
pub mod sanitizer;
pub mod screen;
pub mod spam;
pub mod validation;

pub use config::{Quota, QuotaConfig};
pub use rate_limit::{ActionType, RateLimiter};
pub use sanitizer::sanitize_input;
pub use screen::MessageScreen;
pub use spam::detect_spam_patterns;
