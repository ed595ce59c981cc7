use std::rc::Rc;

use super::node::{ParserFailure, ParserNode, RunState, StepOutcome};
use super::Parser;
use crate::Token;

struct Maybe<T, V> {
    name: Rc<str>,
    inner: Parser<T, V>,
}

impl<T, V: Clone> ParserNode<T> for Maybe<T, V> {
    type Output = Option<V>;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        false
    }

    fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<Option<V>> {
        let start = state.position;
        match self.inner.step(tokens, state) {
            Ok((value, state)) => Ok((Some(value), state)),
            Err(ParserFailure::Grammar(err)) => Err(ParserFailure::Grammar(err)),
            Err(ParserFailure::Backtrack(state)) => {
                if state.position > start {
                    Err(ParserFailure::Backtrack(state))
                } else {
                    Ok((None, state))
                }
            }
        }
    }
}

/// `p`, or `None` if `p` fails without consuming any tokens. If `p` fails
/// after consuming tokens, `maybe(p)` fails too — a partial match is not
/// backtracked out of.
pub fn maybe<T: 'static, V: Clone + 'static>(p: Parser<T, V>) -> Parser<T, Option<V>> {
    let name: Rc<str> = Rc::from(format!("[ {} ]", p.name()));
    Parser::from_node(Maybe { name, inner: p })
}
