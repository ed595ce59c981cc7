use regex::Regex;

/// One entry of the ordered rule list passed to [`crate::lexer::make_tokenizer`]:
/// a token name paired with the regular expression that recognizes it.
///
/// Rules are tried in the order they were given and the **first** one whose
/// pattern matches at the current offset wins (priority order, not
/// longest-match — see [`crate::lexer::Tokenizer`]). A rule built with
/// [`LexerRule::skip`] still advances the cursor on a match but produces no
/// [`crate::Token`], which is how whitespace and comments are usually
/// dropped without a downstream filter.
///
/// Patterns must anchor themselves with `^`: each rule is matched against
/// the remaining input starting at the current offset, not the whole text.
pub struct LexerRule<T> {
    pub(crate) name: T,
    pub(crate) pattern: Regex,
    pub(crate) useful: bool,
}

impl<T: Copy> LexerRule<T> {
    /// Build a rule that produces a token named `name` for text matching
    /// `pattern`. Fails if `pattern` is not a valid regex, or if it matches
    /// the empty string (which would let the tokenizer loop forever).
    pub fn new(name: T, pattern: &str) -> Result<Self, String> {
        let regexp = Regex::new(pattern)
            .map_err(|err| format!("pattern should be a valid regular expression: {}", err))?;

        if regexp.is_match("") {
            return Err(format!(
                "pattern '{}' must not match the empty string",
                regexp.as_str()
            ));
        }

        Ok(Self {
            name,
            pattern: regexp,
            useful: true,
        })
    }

    /// Like [`LexerRule::new`], but the rule is non-useful: it consumes
    /// input and advances the cursor without ever yielding a token.
    pub fn skip(name: T, pattern: &str) -> Result<Self, String> {
        Ok(Self::new(name, pattern)?.non_useful())
    }

    /// Mark an already-built rule as non-useful.
    pub fn non_useful(mut self) -> Self {
        self.useful = false;
        self
    }

    /// Try to match this rule's pattern at byte offset `pointer` of `text`.
    /// Returns the matched substring, or `None` on a miss or on a
    /// (disallowed, but defensively checked) zero-length match.
    pub(crate) fn try_match<'t>(&self, text: &'t str, pointer: usize) -> Option<&'t str> {
        let m = self.pattern.find(&text[pointer..])?;
        debug_assert_eq!(m.start(), 0, "lexer patterns must be anchored with '^'");
        if m.end() == 0 {
            return None;
        }
        Some(&text[pointer..pointer + m.end()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nullable_pattern() {
        assert!(LexerRule::new("x", r"^a*").is_err());
    }

    #[test]
    fn rejects_invalid_regex() {
        assert!(LexerRule::new("x", r"^(").is_err());
    }

    #[test]
    fn matches_at_offset() {
        let rule = LexerRule::new("int", r"^[0-9]+").unwrap();
        assert_eq!(rule.try_match("12ab34", 0), Some("12"));
        assert_eq!(rule.try_match("12ab34", 2), None);
        assert_eq!(rule.try_match("12ab34", 4), Some("34"));
    }
}
