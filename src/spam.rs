//! Spam heuristics
//!
//! Union-of-rules classifier over a single text sample: any one
//! trigger flags the text, there is no scoring or weighting. Mentions
//! and hashtags flag unconditionally regardless of frequency; softening
//! that policy changes the bot's abuse posture and is out of scope
//! here.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[\w$\-.+!*'(),%&@#/?=:~]+").unwrap());

static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());

static COMMERCIAL_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(buy|sell|discount|offer|free|money|cash|prize|winner|click|visit)\b")
        .unwrap()
});

/// Longest run of one repeated character before the text is flagged
const MAX_CHAR_RUN: usize = 10;

/// Distinct-to-total word ratio below which text counts as repetition
const MIN_LEXICAL_DIVERSITY: f64 = 0.3;

/// Uppercase share above which text counts as shouting
const MAX_CAPS_RATIO: f64 = 0.7;

/// Check a text sample for spam indicators.
///
/// Flags URLs, @mentions, #hashtags, long repeated-character runs,
/// commercial keywords, low lexical diversity, and excessive caps.
pub fn detect_spam_patterns(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let lower = text.to_lowercase();

    if URL.is_match(&lower)
        || MENTION.is_match(&lower)
        || HASHTAG.is_match(&lower)
        || COMMERCIAL_KEYWORDS.is_match(&lower)
    {
        return true;
    }

    if has_repeated_run(&lower, MAX_CHAR_RUN) {
        return true;
    }

    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.len() > 5 {
        let unique: HashSet<&str> = words.iter().copied().collect();
        if (unique.len() as f64) / (words.len() as f64) < MIN_LEXICAL_DIVERSITY {
            return true;
        }
    }

    let total_chars = text.chars().count();
    if total_chars > 10 {
        let caps = text.chars().filter(|c| c.is_uppercase()).count();
        if (caps as f64) / (total_chars as f64) > MAX_CAPS_RATIO {
            return true;
        }
    }

    false
}

/// True when any character repeats at least `limit` times in a row.
/// Scanned by hand: the regex crate has no backreferences.
fn has_repeated_run(text: &str, limit: usize) -> bool {
    let mut run = 0;
    let mut previous = None;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
            if run >= limit {
                return true;
            }
        } else {
            previous = Some(c);
            run = 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_spam() {
        assert!(detect_spam_patterns("check out https://example.com/deal"));
        assert!(detect_spam_patterns("HTTP://CAPS.example"));
    }

    #[test]
    fn test_mentions_and_hashtags_are_spam() {
        assert!(detect_spam_patterns("hi @someone"));
        assert!(detect_spam_patterns("today was #blessed"));
    }

    #[test]
    fn test_repeated_characters_are_spam() {
        assert!(detect_spam_patterns("aaaaaaaaaaaaaaa"));
        assert!(!detect_spam_patterns("aaaa okay"));
    }

    #[test]
    fn test_commercial_keywords_are_spam() {
        assert!(detect_spam_patterns("limited offer just for you"));
        assert!(detect_spam_patterns("WINNER announced"));
        // Substrings of keywords do not count
        assert!(!detect_spam_patterns("the clicking sound annoyed me"));
    }

    #[test]
    fn test_low_lexical_diversity_is_spam() {
        assert!(detect_spam_patterns("spam spam spam spam spam spam spam"));
        assert!(!detect_spam_patterns("today i felt genuinely calm and rested"));
    }

    #[test]
    fn test_excessive_caps_is_spam() {
        // 20 chars, 90% uppercase letters
        assert!(detect_spam_patterns("AAAABBBBCCCCDDDDEF g"));
        assert!(!detect_spam_patterns("Shouting ONCE is fine here"));
    }

    #[test]
    fn test_normal_sentences_pass() {
        assert!(!detect_spam_patterns("The quick brown fox jumps over the lazy dog"));
        assert!(!detect_spam_patterns(""));
        assert!(!detect_spam_patterns("short"));
    }
}
