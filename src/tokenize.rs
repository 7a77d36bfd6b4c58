use regex::Regex;
use std::sync::LazyLock;

/// A normalized word: lowercase, made only of word characters.
pub type Token = String;

// Word characters are alphanumerics and underscore; marks, joiners and connector punctuation
// are not.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{N}_]").expect("static pattern is valid")
});

/// Splits text into lowercase word tokens.
///
/// Every non-word character becomes a space, the result is lowercased and then split on runs
/// of whitespace. Duplicates and order are kept since repeated words count repeatedly.
pub fn tokenize(text: &str) -> Vec<Token> {
    NON_WORD
        .replace_all(text, " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(
            tokenize("Let's meet, for LUNCH tomorrow!"),
            vec!["let", "s", "meet", "for", "lunch", "tomorrow"]
        );
    }

    #[test]
    fn keeps_underscores_digits_and_duplicates() {
        assert_eq!(
            tokenize("snake_case 42 spam spam"),
            vec!["snake_case", "42", "spam", "spam"]
        );
    }

    #[test]
    fn empty_and_punctuation_only_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n").is_empty());
        assert!(tokenize("?!... --- ,;").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_word_characters() {
        assert_eq!(tokenize("Crème Brûlée!"), vec!["crème", "brûlée"]);
    }

    #[test]
    fn numeric_symbols_are_word_characters() {
        assert_eq!(tokenize("x² ½"), vec!["x²", "½"]);
    }

    #[test]
    fn combining_marks_split_words() {
        assert_eq!(tokenize("e\u{301}te"), vec!["e", "te"]);
    }

    #[test]
    fn connector_punctuation_and_joiners_split_words() {
        assert_eq!(tokenize("a\u{203F}b"), vec!["a", "b"]);
        assert_eq!(tokenize("a\u{200D}b"), vec!["a", "b"]);
        assert_eq!(tokenize("a_b"), vec!["a_b"]);
    }

    #[test]
    fn tokenizing_joined_tokens_is_idempotent() {
        for text in [
            "buy cheap pills now",
            "  Hello,   World!! hello ",
            "a-b_c.d/e",
            "",
            "Ünïcödé & ASCII; mixed-up TEXT",
        ] {
            let once = tokenize(text);
            let twice = tokenize(&once.join(" "));
            assert_eq!(once, twice, "input: {text:?}");
        }
    }
}
