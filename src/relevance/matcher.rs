// Word-boundary term matching.
//
// A term matches only as a whole word or phrase: "wage" matches "minimum
// wage rises" but not "sewage", and "pay" does not match inside "payé".
// Patterns are compiled once and reused for every article in a batch.
//
// Boundaries are checked on Unicode word characters (letters, digits, `_`),
// and only on the sides of the term that begin or end with one. A keyword
// like "u.s." therefore matches at the end of a sentence.

use anyhow::{Context, Result};
use regex_lite::Regex;

/// A compiled whole-word matcher for a single term.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    term: String,
    pattern: Regex,
}

impl WordMatcher {
    /// Compile a matcher for `term`.
    ///
    /// The term is lower-cased before compiling; the text passed to
    /// [`WordMatcher::is_match`] must be lower-cased too.
    pub fn new(term: &str) -> Result<Self> {
        let pattern = regex_lite::escape(&term.to_lowercase());
        let pattern = Regex::new(&pattern)
            .with_context(|| format!("Failed to compile matcher for term '{term}'"))?;
        Ok(Self {
            term: term.to_string(),
            pattern,
        })
    }

    /// The term as originally written (used for display).
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether the term occurs as a whole word in already lower-cased text.
    pub fn is_match(&self, lowered_text: &str) -> bool {
        let mut start = 0;
        while let Some(m) = self.pattern.find_at(lowered_text, start) {
            if self.is_bounded(lowered_text, m.start(), m.end()) {
                return true;
            }
            // Candidates can overlap, so resume one character past this one
            start = m.start()
                + lowered_text[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            if start > lowered_text.len() {
                break;
            }
        }
        false
    }

    fn is_bounded(&self, text: &str, start: usize, end: usize) -> bool {
        let first = self.term.chars().next();
        let last = self.term.chars().next_back();

        let left_ok = !first.is_some_and(is_word_char)
            || !text[..start].chars().next_back().is_some_and(is_word_char);
        let right_ok = !last.is_some_and(is_word_char)
            || !text[end..].chars().next().is_some_and(is_word_char);
        left_ok && right_ok
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Compile one matcher per term, in order.
pub fn compile_all<S: AsRef<str>>(terms: &[S]) -> Result<Vec<WordMatcher>> {
    terms.iter().map(|t| WordMatcher::new(t.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        let m = WordMatcher::new("wage").unwrap();
        assert!(m.is_match("the minimum wage rises"));
        assert!(!m.is_match("the sewage plant"));
        assert!(!m.is_match("wages are up"));
    }

    #[test]
    fn test_phrase_match() {
        let m = WordMatcher::new("pay raise").unwrap();
        assert!(m.is_match("officers get a pay raise."));
        assert!(!m.is_match("pay and raise"));
    }

    #[test]
    fn test_term_is_lowercased_but_kept_for_display() {
        let m = WordMatcher::new("RSUs").unwrap();
        assert_eq!(m.term(), "RSUs");
        assert!(m.is_match("new rsus for staff"));
    }

    #[test]
    fn test_accented_neighbours_are_word_characters() {
        let m = WordMatcher::new("pay").unwrap();
        assert!(!m.is_match("le salarié payé"));
        assert!(!m.is_match("épay"));
        assert!(m.is_match("la pay é"));
    }

    #[test]
    fn test_trailing_punctuation_term_matches_before_space_and_end() {
        let m = WordMatcher::new("u.s.").unwrap();
        assert!(m.is_match("u.s. employers added jobs"));
        assert!(m.is_match("wages rose in the u.s."));
        assert!(!m.is_match("nu.s. misc"));
    }

    #[test]
    fn test_overlapping_candidates_are_all_tried() {
        let m = WordMatcher::new("ab ab").unwrap();
        assert!(m.is_match("xab ab ab"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let m = WordMatcher::new("401k").unwrap();
        assert!(m.is_match("401k match"));
        let m = WordMatcher::new("c++").unwrap();
        assert!(!m.is_match("cxx"));
    }
}
