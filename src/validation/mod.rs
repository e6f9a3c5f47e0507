//! Structured field validation
//!
//! Pure predicates over the bot's structured inputs. Every validator
//! is total: malformed shape means `false`, never a panic or an error
//! value.

pub mod emotion;
pub mod settings;
pub mod time;
pub mod timezone;

pub use emotion::validate_emotion_data;
pub use settings::validate_user_settings;
pub use time::validate_time_format;
pub use timezone::validate_timezone;
