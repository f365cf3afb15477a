/// Lower-case the input and collapse runs of whitespace into single spaces.
pub(crate) fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub(crate) fn contains_any<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    terms.iter().any(|term| text.contains(term.as_ref()))
}

pub(crate) fn count_matches<S: AsRef<str>>(text: &str, terms: &[S]) -> usize {
    terms
        .iter()
        .filter(|term| text.contains(term.as_ref()))
        .count()
}

/// Whole-word containment, so "son" does not match inside "person".
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    text.match_indices(word).any(|(start, matched)| {
        let end = start + matched.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize("  Army\tCOMBAT \n Veteran "), "army combat veteran");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn contains_word_respects_boundaries() {
        assert!(contains_word("my son served", "son"));
        assert!(contains_word("son.", "son"));
        assert!(!contains_word("a reasonable person", "son"));
        assert!(!contains_word("apparently", "parent"));
    }

    #[test]
    fn count_matches_counts_distinct_terms() {
        let terms = ["army", "soldier", "navy"];
        assert_eq!(count_matches("army soldier, army again", &terms), 2);
        assert!(!contains_any("", &terms));
    }
}
