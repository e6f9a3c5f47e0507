//! Free-text sanitization
//!
//! Converts raw user text into safe, bounded text before it touches
//! storage or rendering. Stage order matters: whitespace collapse and
//! truncation run on semantic content first, markup escaping second,
//! and the dangerous-pattern strips operate on the escaped string as a
//! second defense layer.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SCRIPT_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").unwrap());

static EVENT_HANDLERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").unwrap());

/// Sanitize untrusted input and bound its length.
///
/// Collapses whitespace, truncates to `max_length` characters (a `...`
/// marker is appended when text was cut), escapes markup-significant
/// characters, strips script tags, `javascript:` schemes and inline
/// event handlers, then removes leftover injection characters and
/// control characters other than newline and tab.
///
/// Never fails: malformed input degrades to best-effort sanitized
/// output.
pub fn sanitize_input(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = WHITESPACE_RUNS.replace_all(text.trim(), " ");

    let mut text = match text.char_indices().nth(max_length) {
        Some((byte_idx, _)) => {
            let mut truncated = text[..byte_idx].to_string();
            truncated.push_str("...");
            truncated
        }
        None => text.into_owned(),
    };

    text = escape_markup(&text);

    let text = SCRIPT_TAGS.replace_all(&text, "");
    let text = JAVASCRIPT_SCHEME.replace_all(&text, "");
    let text = EVENT_HANDLERS.replace_all(&text, "");

    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '{' | '}' | ';'))
        .filter(|&c| c as u32 >= 32 || c == '\n' || c == '\t')
        .collect()
}

/// Escape markup-significant characters to their entity forms
fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 1000;

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(sanitize_input("", MAX), "");
        assert_eq!(sanitize_input("   \n\t  ", MAX), "");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(
            sanitize_input("  feeling   calm\n\nand   rested  ", MAX),
            "feeling calm and rested"
        );
    }

    #[test]
    fn test_truncates_with_ellipsis_marker() {
        let long = "a".repeat(50);
        let out = sanitize_input(&long, 10);
        assert_eq!(out, format!("{}...", "a".repeat(10)));
        assert!(out.chars().count() <= 10 + 3);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let long = "é".repeat(20);
        let out = sanitize_input(&long, 5);
        assert_eq!(out, format!("{}...", "é".repeat(5)));
    }

    #[test]
    fn test_script_tags_cannot_survive_as_markup() {
        let out = sanitize_input("hello <ScRiPt>alert(1)\n</sCrIpT> world", MAX);
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert!(out.contains("hello"));
        assert!(out.contains("world"));
    }

    #[test]
    fn test_strips_javascript_scheme_and_event_handlers() {
        let out = sanitize_input("click JAVASCRIPT:alert(1) onload = x onclick=y", MAX);
        let lower = out.to_lowercase();
        assert!(!lower.contains("javascript:"));
        assert!(!lower.contains("onload"));
        assert!(!lower.contains("onclick"));
    }

    #[test]
    fn test_removes_injection_characters() {
        let out = sanitize_input("a<b>c\"d'e{f}g;h", MAX);
        for c in ['<', '>', '"', '\'', '{', '}', ';'] {
            assert!(!out.contains(c), "found {c:?} in {out:?}");
        }
    }

    #[test]
    fn test_removes_control_characters() {
        let out = sanitize_input("ab\x00cd\x07ef\x1bgh", MAX);
        assert_eq!(out, "abcdefgh");
    }

    #[test]
    fn test_idempotent_on_injected_patterns() {
        let samples = [
            "<script>alert('x')</script> hi",
            "javascript:void(0)",
            "<img onerror=alert(1)>",
            "mixed <SCRIPT src=x>a</SCRIPT> javascript: onfocus= tail",
        ];
        for sample in samples {
            let once = sanitize_input(sample, MAX);
            // A second pass must find nothing left to strip
            assert!(!SCRIPT_TAGS.is_match(&once), "script tag survived {sample:?}");
            assert!(!JAVASCRIPT_SCHEME.is_match(&once), "scheme survived {sample:?}");
            assert!(!EVENT_HANDLERS.is_match(&once), "handler survived {sample:?}");
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            sanitize_input("felt a bit anxious before the meeting", MAX),
            "felt a bit anxious before the meeting"
        );
    }
}
