use std::rc::Rc;

use super::node::{ParserFailure, ParserNode, RunState, StepOutcome};
use super::{GrammarError, Parser};
use crate::Token;

struct Many<T, V> {
    name: Rc<str>,
    inner: Parser<T, V>,
    at_least_one: bool,
}

impl<T, V> ParserNode<T> for Many<T, V> {
    type Output = Vec<V>;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        self.at_least_one && self.inner.may_halt()
    }

    fn step(&self, tokens: &[Token<T>], mut state: RunState) -> StepOutcome<Vec<V>> {
        if !self.inner.may_halt() {
            return Err(ParserFailure::Grammar(GrammarError {
                message: format!(
                    "{} is applied to '{}', which can succeed without consuming any input; \
                     this would loop forever",
                    if self.at_least_one { "oneplus" } else { "many" },
                    self.inner.name()
                ),
            }));
        }

        let mut results = Vec::new();
        loop {
            let iter_start = state.position;
            match self.inner.step(tokens, state) {
                Ok((value, new_state)) => {
                    results.push(value);
                    state = new_state;
                }
                Err(ParserFailure::Grammar(err)) => return Err(ParserFailure::Grammar(err)),
                Err(ParserFailure::Backtrack(new_state)) => {
                    if new_state.position > iter_start {
                        return Err(ParserFailure::Backtrack(new_state));
                    }
                    state = new_state;
                    break;
                }
            }
        }

        if self.at_least_one && results.is_empty() {
            state.record_failure(state.position, self.inner.name());
            return Err(ParserFailure::Backtrack(state));
        }

        Ok((results, state))
    }
}

/// Zero or more repetitions of `p`, collected into a `Vec` in order.
/// `p` must be guaranteed to consume at least one token on success
/// ([`Parser::may_halt`]); wrapping a parser that might not is a
/// [`GrammarError`], since it would let the repetition loop forever.
pub fn many<T: 'static, V: 'static>(p: Parser<T, V>) -> Parser<T, Vec<V>> {
    let name: Rc<str> = Rc::from(format!("{{ {} }}", p.name()));
    Parser::from_node(Many {
        name,
        inner: p,
        at_least_one: false,
    })
}

/// One or more repetitions of `p`, collected into a `Vec` in order. Same
/// consumption requirement as [`many`].
pub fn oneplus<T: 'static, V: 'static>(p: Parser<T, V>) -> Parser<T, Vec<V>> {
    let name: Rc<str> = Rc::from(format!("{}+", p.name()));
    Parser::from_node(Many {
        name,
        inner: p,
        at_least_one: true,
    })
}
