use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").unwrap();
}

/// Checks a free-text guess against the accepted answer.
///
/// The guess is stripped of punctuation and lower-cased, then compared
/// against each whitespace-separated token of the accepted answer. A guess
/// matching any single token is accepted, so one word of a multi-word
/// answer counts as correct. An empty cleaned guess never matches.
///
/// Pure: the play view calls this once when scoring a submission and again
/// when rendering the correct/incorrect banner, and both calls must agree.
pub fn evaluate(guess: &str, accepted_answer: &str) -> bool {
    let cleaned = PUNCTUATION.replace_all(guess, "").to_lowercase();
    if cleaned.is_empty() {
        return false;
    }

    accepted_answer
        .split_whitespace()
        .any(|token| token.to_lowercase() == cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(evaluate("Water", "Water"));
    }

    #[test]
    fn test_punctuation_is_stripped_from_guess() {
        assert!(evaluate("PARIS!!", "Paris France"));
        assert!(evaluate("(paris)", "Paris France"));
        assert!(evaluate("pa-ris", "Paris France"));
    }

    #[test]
    fn test_near_miss_is_rejected() {
        assert!(!evaluate("pariss", "Paris France"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(evaluate("WATER", "water"));
        assert!(evaluate("muhammad", "Muhammad Ali"));
    }

    // A guess equal to any one token of a multi-word answer is accepted;
    // the whole phrase is not required. Lenient on purpose.
    #[test]
    fn test_single_token_of_multiword_answer_is_accepted() {
        assert!(evaluate("france", "Paris France"));
        assert!(evaluate("paris", "Paris France"));
        assert!(!evaluate("paris france", "Paris France"));
    }

    #[test]
    fn test_empty_guess_never_matches() {
        assert!(!evaluate("", "Water"));
        assert!(!evaluate("!!!", "Water"));
        assert!(!evaluate("", ""));
    }

    #[test]
    fn test_whitespace_guess_never_matches() {
        assert!(!evaluate("   ", "Water"));
    }

    #[test]
    fn test_empty_answer_never_matches() {
        assert!(!evaluate("water", ""));
    }

    #[test]
    fn test_evaluate_is_pure() {
        let first = evaluate("PARIS!!", "Paris France");
        let second = evaluate("PARIS!!", "Paris France");
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_guess_with_inner_spaces_is_not_tokenized() {
        // Only the answer is split; a multi-word guess must match a
        // token verbatim after cleaning, which it can't.
        assert!(!evaluate("new york", "New York"));
    }
}
