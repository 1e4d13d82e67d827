//! Drug search matching rules.
//!
//! A search term matches a drug when the drug's name contains the term, ignoring case. The
//! empty term matches every drug. [`like_pattern`] expresses the same rule for `ILIKE`.

/// Build an `ILIKE` pattern that matches `term` as a literal substring.
///
/// `%`, `_` and the escape character `\` are escaped so that user input never acts as a
/// wildcard.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// In-process equivalent of matching `name` against [`like_pattern`]`(term)`.
pub fn matches_term(name: &str, term: &str) -> bool {
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_term_in_wildcards() {
        assert_eq!(like_pattern("asp"), "%asp%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\d"), "%c:\\\\d%");
    }

    #[test]
    fn matching_ignores_case() {
        assert!(matches_term("Aspirin", "asp"));
        assert!(matches_term("ASPIRIN", "pIr"));
        assert!(!matches_term("Insulin", "asp"));
        assert!(matches_term("Insulin", ""));
    }
}
