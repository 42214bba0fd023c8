//! Double Metaphone encoding backed by `rphonetic`.

use rphonetic::{DoubleMetaphone, Encoder};
use std::panic::{self, AssertUnwindSafe};

use super::PhoneticEncoder;

/// Primary Double Metaphone code of a piece of text.
///
/// Codes are never truncated: "trailer park" and "trailer" encode
/// differently.
///
/// # Examples
///
/// ```rust
/// use name_guard::sources::{DoubleMetaphoneEncoder, PhoneticEncoder};
///
/// let encoder = DoubleMetaphoneEncoder::default();
/// assert_eq!(encoder.encode("hood"), encoder.encode("hud"));
/// assert_eq!(encoder.encode("1234"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleMetaphoneEncoder;

/// Upper bound on the code length for `text`. A letter yields at most two
/// code characters ("x" becomes "KS"), and uppercasing never produces more
/// characters than the input has bytes.
fn code_length_bound(text: &str) -> usize {
    text.len() * 2 + 1
}

impl PhoneticEncoder for DoubleMetaphoneEncoder {
    fn encode(&self, text: &str) -> Option<String> {
        if !text.chars().any(char::is_alphabetic) {
            return None;
        }
        // An encoder panic is treated like any other encoding failure.
        let inner = DoubleMetaphone::new(code_length_bound(text));
        let code = panic::catch_unwind(AssertUnwindSafe(|| inner.encode(text))).ok()?;
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homophones_share_a_code() {
        let encoder = DoubleMetaphoneEncoder::default();
        assert_eq!(encoder.encode("hood"), encoder.encode("hud"));
        assert_eq!(encoder.encode("ghetto"), encoder.encode("getto"));
    }

    #[test]
    fn test_different_words_differ() {
        let encoder = DoubleMetaphoneEncoder::default();
        assert_ne!(encoder.encode("pleasant valley"), encoder.encode("ghetto"));
    }

    #[test]
    fn test_long_phrases_keep_their_full_code() {
        let encoder = DoubleMetaphoneEncoder::default();
        let park = encoder.encode("trailer park").unwrap();
        assert!(park.len() > 4, "{park}");
        assert_ne!(encoder.encode("trailer park"), encoder.encode("trailer ridge"));
        assert_ne!(encoder.encode("trailer park"), encoder.encode("trailer"));
        assert_ne!(
            encoder.encode("shantytown heights"),
            encoder.encode("shantytown")
        );
        assert_eq!(encoder.encode("Trailer Park"), encoder.encode("trailer park"));
    }

    #[test]
    fn test_non_alphabetic_input() {
        let encoder = DoubleMetaphoneEncoder::default();
        assert_eq!(encoder.encode(""), None);
        assert_eq!(encoder.encode("  42 "), None);
    }
}
