//! Candidate word extraction from book text.
//!
//! A token survives when it has at least two leading characters outside the
//! rejected punctuation/digit set and ends in a sentence mark or a character
//! from the `A-z` codepoint range, which also spans `[`, `\`, `]`, `^`, `_`
//! and the backtick.
//! Survivors lose one trailing non-`A-z` character and are lowercased.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Acceptance pattern for a whitespace-delimited token.
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^0-9$&+;=@#|“"'<>^*.\[\]?!:()%-]{2,}[?!,.A-z{1}]$"#)
        .expect("Invalid WORD_REGEX")
});

/// Token separator. ASCII whitespace only, so a no-break space stays inside
/// its token.
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\s+").expect("Invalid WHITESPACE_REGEX"));

/// Returns true for characters inside the `A-z` codepoint range.
fn in_letter_range(c: char) -> bool {
    ('A'..='z').contains(&c)
}

/// Checks a single token against the acceptance pattern.
pub fn is_candidate(token: &str) -> bool {
    WORD_REGEX.is_match(token)
}

/// Turns an accepted token into a headword.
fn normalize(token: &str) -> String {
    let trimmed = match token.chars().last() {
        Some(last) if !in_letter_range(last) => &token[..token.len() - last.len_utf8()],
        _ => token,
    };
    trimmed.to_lowercase()
}

/// Extracts the set of candidate headwords from book content.
///
/// Pure: identical content always yields the identical set.
pub fn extract_words(content: &str) -> HashSet<String> {
    WHITESPACE_REGEX
        .split(content)
        .filter(|token| is_candidate(token))
        .map(normalize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "The quick brown fox, jumps over 42 dogs! a \"bad\" token; fine.";

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_sample_sentence() {
        let words = extract_words(SAMPLE);
        assert_eq!(
            words,
            set(&["the", "quick", "brown", "fox", "jumps", "over", "dogs", "fine"])
        );
    }

    #[test]
    fn test_rejected_tokens() {
        assert!(!is_candidate("42"));
        assert!(!is_candidate("a"));
        assert!(!is_candidate("\"bad\""));
        assert!(!is_candidate("token;"));
        assert!(!is_candidate("“quoted"));
        assert!(!is_candidate("(aside)"));
        assert!(!is_candidate("e-mail"));
        assert!(!is_candidate("don't"));
    }

    #[test]
    fn test_two_letter_words_need_trailing_mark() {
        // Two leading characters are required before the final one
        assert!(!is_candidate("to"));
        assert_eq!(extract_words("to be."), set(&["be"]));
    }

    #[test]
    fn test_single_trailing_mark_stripped() {
        assert_eq!(extract_words("end?"), set(&["end"]));
        assert_eq!(extract_words("wow!"), set(&["wow"]));
        assert_eq!(extract_words("abc1"), set(&["abc"]));
        // Only the last character is trimmed
        assert_eq!(extract_words("wait,."), set(&["wait,"]));
        assert_eq!(extract_words("so,,"), set(&["so,"]));
    }

    #[test]
    fn test_letter_range_quirk() {
        // Underscore lies between 'Z' and 'a', so it is kept
        assert_eq!(extract_words("snake_"), set(&["snake_"]));
        assert_eq!(extract_words("odd^"), set(&["odd^"]));
        assert!(in_letter_range('_'));
        assert!(!in_letter_range('1'));
    }

    #[test]
    fn test_lowercase_and_dedup() {
        let words = extract_words("House house HOUSE. Garden");
        assert_eq!(words, set(&["house", "garden"]));
        assert!(words.iter().all(|w| *w == w.to_lowercase()));
    }

    #[test]
    fn test_minimum_length_after_trim() {
        let words = extract_words("ab. xy! no, hi? ok zz");
        assert_eq!(words, set(&["ab", "xy", "no", "hi"]));
        assert!(words.iter().all(|w| w.chars().count() >= 2));
    }

    #[test]
    fn test_purity() {
        assert_eq!(extract_words(SAMPLE), extract_words(SAMPLE));
        assert!(extract_words("").is_empty());
        assert!(extract_words("   \n\t ").is_empty());
    }

    #[test]
    fn test_unicode_spaces_do_not_split() {
        assert_eq!(extract_words("foo\u{a0}bar."), set(&["foo\u{a0}bar"]));
        assert_eq!(
            extract_words("Wide\u{2003}gap here\x0bnow"),
            set(&["wide\u{2003}gap", "here", "now"])
        );
    }

    #[test]
    fn test_whitespace_runs() {
        let words = extract_words("  alpha\t\tbeta\n\ngamma  ");
        assert_eq!(words, set(&["alpha", "beta", "gamma"]));
    }
}
