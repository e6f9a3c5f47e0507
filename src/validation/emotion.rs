//! Emotion entry validation

/// Most emotions accepted in one entry
const MAX_EMOTIONS: usize = 10;

/// Longest accepted emotion label, in characters
const MAX_EMOTION_LEN: usize = 50;

/// Longest accepted category name, in characters
const MAX_CATEGORY_LEN: usize = 100;

/// Validate one emotion entry before it is accepted.
///
/// Requires 1 to 10 emotion labels of at most 50 characters each, a
/// category of at most 100 characters, valence in [-1, 1] and arousal
/// in [0, 2]. Any violation fails the whole entry.
pub fn validate_emotion_data(
    emotions: &[String],
    category: &str,
    valence: f64,
    arousal: f64,
) -> bool {
    if emotions.is_empty() || emotions.len() > MAX_EMOTIONS {
        return false;
    }

    if emotions.iter().any(|e| e.chars().count() > MAX_EMOTION_LEN) {
        return false;
    }

    if category.chars().count() > MAX_CATEGORY_LEN {
        return false;
    }

    // NaN fails both range checks
    if !(-1.0..=1.0).contains(&valence) {
        return false;
    }

    if !(0.0..=2.0).contains(&arousal) {
        return false;
    }

    true
}
