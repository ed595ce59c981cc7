use super::{LexerError, LexerRule};
use crate::position::Code;
use crate::log::Log;
use crate::Token;
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

/// Compiles an ordered list of [`LexerRule`]s into a tokenizer.
///
/// Equivalent to `Tokenizer::new(rules)`; kept as a free function because
/// that is the shape callers reach for first when wiring up a grammar.
pub fn make_tokenizer<T: Copy + Debug>(rules: Vec<LexerRule<T>>) -> Tokenizer<T> {
    Tokenizer::new(rules)
}

/// A compiled lexer: an ordered set of rules plus the scan loop that turns
/// source text into a lazy sequence of [`Token`]s.
///
/// [`Tokenizer::tokenize`] does not materialize a `Vec` itself — it hands
/// back an iterator — but [`crate::parser::Parser::parse`] needs
/// random-access, so callers typically `.collect::<Result<Vec<_>, _>>()`
/// before parsing (see the crate-level example).
pub struct Tokenizer<T> {
    rules: Vec<LexerRule<T>>,
    debug: OnceCell<Log<&'static str>>,
}

impl<T: Copy + Debug> Tokenizer<T> {
    pub fn new(rules: Vec<LexerRule<T>>) -> Self {
        Self {
            rules,
            debug: OnceCell::new(),
        }
    }

    /// Assign a debug verbosity to this tokenizer. May only be called once;
    /// a second call returns an error naming the level already set.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log)
            .map_err(|err| format!("log label {} is already assigned", err))
    }

    /// Scan `text` left to right, trying rules in priority order at each
    /// offset. Returns a lazy iterator of tokens; iterating past a
    /// [`LexerError`] yields no further items.
    pub fn tokenize<'t>(&self, text: &'t str) -> TokenIter<'t, '_, T> {
        TokenIter {
            tokenizer: self,
            code: Code::new(text),
            pointer: 0,
            done: false,
        }
    }
}

/// Lazy token sequence produced by [`Tokenizer::tokenize`].
pub struct TokenIter<'t, 'r, T> {
    tokenizer: &'r Tokenizer<T>,
    code: Code<'t>,
    pointer: usize,
    done: bool,
}

impl<'t, 'r, T: Copy + Debug> Iterator for TokenIter<'t, 'r, T> {
    type Item = Result<Token<T>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let debug = self.tokenizer.debug.get().copied().unwrap_or(Log::None);

        loop {
            if self.done {
                return None;
            }
            if self.pointer == self.code.value.len() {
                self.done = true;
                return None;
            }

            match self
                .tokenizer
                .rules
                .iter()
                .find_map(|rule| rule.try_match(self.code.value, self.pointer).map(|m| (rule, m)))
            {
                Some((rule, matched)) => {
                    let start = self.code.position_at(self.pointer);
                    let last_char_offset =
                        matched.char_indices().last().map(|(i, _)| i).unwrap_or(0);
                    let end = self.code.position_at(self.pointer + last_char_offset);
                    self.pointer += matched.len();

                    if rule.useful {
                        if cfg!(debug_assertions) && debug.order() >= Log::Success(()).order() {
                            println!("[{}; lexeme success] at {}", debug, start);
                        }
                        return Some(Ok(Token::at(rule.name, matched.to_string(), start, end)));
                    }
                    // non-useful rule: consume and keep scanning without emitting a token
                }
                None => {
                    self.done = true;
                    let position = self.code.position_at(self.pointer);
                    if cfg!(debug_assertions) && debug.order() >= Log::Default(()).order() {
                        println!("[{}; lexeme failure] at {}", debug, position);
                    }
                    return Some(Err(LexerError::new(
                        self.pointer,
                        position,
                        format!("failed to tokenize input at {}", position),
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tok {
        Space,
        Int,
        Float,
        Op,
    }

    fn tokenizer() -> Tokenizer<Tok> {
        make_tokenizer(vec![
            LexerRule::skip(Tok::Space, r"^[ \t\n]+").unwrap(),
            LexerRule::new(Tok::Float, r"^[+-]?[0-9]+\.[0-9]*").unwrap(),
            LexerRule::new(Tok::Int, r"^[+-]?[0-9]+").unwrap(),
            LexerRule::new(Tok::Op, r"^[+\-*/]").unwrap(),
        ])
    }

    #[test]
    fn skips_non_useful_rules() {
        let toks: Vec<_> = tokenizer()
            .tokenize("1 + 2")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].ty, Tok::Int);
        assert_eq!(toks[1].ty, Tok::Op);
    }

    #[test]
    fn earlier_rule_wins_priority_not_longest_match() {
        // S8: float must be listed before int to win on "3.14"; a plain int
        // would also match a prefix of "3.14" ("3") if tried first.
        let toks: Vec<_> = tokenizer()
            .tokenize("3.14")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].ty, Tok::Float);
        assert_eq!(toks[0].value, "3.14");

        let toks: Vec<_> = tokenizer().tokenize("3").collect::<Result<_, _>>().unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].ty, Tok::Int);
    }

    #[test]
    fn reports_position_of_unlexable_input() {
        let err = tokenizer()
            .tokenize("1 + @")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.pointer, 4);
        assert_eq!(err.position, crate::Position::new(1, 5));
    }

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let toks: Vec<_> = tokenizer()
            .tokenize("1\n22")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(toks[0].start, crate::Position::new(1, 1));
        assert_eq!(toks[1].start, crate::Position::new(2, 1));
        assert_eq!(toks[1].end, crate::Position::new(2, 2));
    }
}
