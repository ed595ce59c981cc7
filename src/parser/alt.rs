use std::ops::BitOr;
use std::rc::Rc;

use super::node::{ParserFailure, ParserNode, RunState, StepOutcome};
use super::Parser;
use crate::Token;

struct Alternative<T, V> {
    name: Rc<str>,
    may_halt: bool,
    left: Parser<T, V>,
    right: Parser<T, V>,
}

impl<T, V> ParserNode<T> for Alternative<T, V> {
    type Output = V;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        self.may_halt
    }

    fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<V> {
        let start = state.position;
        match self.left.step(tokens, state) {
            Ok(ok) => Ok(ok),
            Err(ParserFailure::Grammar(err)) => Err(ParserFailure::Grammar(err)),
            Err(ParserFailure::Backtrack(state)) => {
                // `left` consumed tokens before failing: once a branch has
                // committed, this alternative does not backtrack into the
                // next one, even though it ultimately fails too.
                if state.position > start {
                    Err(ParserFailure::Backtrack(state))
                } else {
                    self.right.step(tokens, state)
                }
            }
        }
    }
}

/// Try `left`; if it fails without consuming any tokens, try `right`
/// instead. If `left` fails after consuming tokens, the whole alternative
/// fails without trying `right` — there is no backtracking past a
/// committed partial match.
pub fn alt<T: 'static, V: 'static>(left: Parser<T, V>, right: Parser<T, V>) -> Parser<T, V> {
    let name: Rc<str> = Rc::from(format!("{} or {}", left.name(), right.name()));
    let may_halt = left.may_halt() && right.may_halt();
    Parser::from_node(Alternative {
        name,
        may_halt,
        left,
        right,
    })
}

impl<T: 'static, V: 'static> BitOr for Parser<T, V> {
    type Output = Parser<T, V>;

    fn bitor(self, rhs: Parser<T, V>) -> Self::Output {
        alt(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::super::primitives::equals;
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tok {
        Word,
    }

    fn tok(v: &str) -> Token<Tok> {
        Token::new(Tok::Word, v)
    }

    #[test]
    fn falls_back_when_left_does_not_consume() {
        // S3: `(equals('a') + equals('b')) | equals('a')` against `['a']`.
        let tokens = vec![tok("a")];
        let grammar = (equals(tok("a")) + equals(tok("b"))).map(|(a, _)| a)
            | equals(tok("a"));
        let result = grammar.parse(&tokens).unwrap();
        assert_eq!(result.value, "a");
    }

    #[test]
    fn takes_left_when_it_matches() {
        let tokens = vec![tok("a"), tok("b")];
        let grammar = (equals(tok("a")) + equals(tok("b"))) | (equals(tok("a")) + equals(tok("a")));
        let (a, b) = grammar.parse(&tokens).unwrap();
        assert_eq!((a.value.as_str(), b.value.as_str()), ("a", "b"));
    }

    #[test]
    fn does_not_backtrack_past_a_committed_partial_match() {
        // left consumes 'a' then fails on the second token; right is never tried.
        let tokens = vec![tok("a"), tok("x")];
        let grammar = (equals(tok("a")) + equals(tok("b"))) | equals(tok("a"));
        assert!(grammar.parse(&tokens).is_err());
    }
}
