use std::fmt::Debug;
use std::rc::Rc;

use super::node::{ParserFailure, ParserNode, RunState, StepOutcome};
use super::Parser;
use crate::Token;

struct Any<T> {
    name: Rc<str>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Clone> ParserNode<T> for Any<T> {
    type Output = Token<T>;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        true
    }

    fn step(&self, tokens: &[Token<T>], mut state: RunState) -> StepOutcome<Token<T>> {
        match tokens.get(state.position) {
            Some(tok) => {
                state.position += 1;
                Ok((tok.clone(), state))
            }
            None => {
                state.record_failure(state.position, self.name());
                Err(ParserFailure::Backtrack(state))
            }
        }
    }
}

/// Matches exactly one token of any kind.
pub fn any<T: Clone>() -> Parser<T, Token<T>> {
    Parser::from_node(Any {
        name: Rc::from("any token"),
        _marker: std::marker::PhantomData,
    })
}

struct Satisfy<T, F> {
    name: Rc<str>,
    pred: F,
    _marker: std::marker::PhantomData<T>,
}

impl<T, F> ParserNode<T> for Satisfy<T, F>
where
    T: Clone,
    F: Fn(&Token<T>) -> bool,
{
    type Output = Token<T>;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        true
    }

    fn step(&self, tokens: &[Token<T>], mut state: RunState) -> StepOutcome<Token<T>> {
        let at = state.position;
        match tokens.get(at) {
            Some(tok) if (self.pred)(tok) => {
                state.position += 1;
                Ok((tok.clone(), state))
            }
            _ => {
                state.record_failure(at, self.name());
                Err(ParserFailure::Backtrack(state))
            }
        }
    }
}

/// Matches one token for which `pred` returns `true`.
pub fn satisfy<T: Clone + 'static>(
    name: impl Into<Rc<str>>,
    pred: impl Fn(&Token<T>) -> bool + 'static,
) -> Parser<T, Token<T>> {
    Parser::from_node(Satisfy {
        name: name.into(),
        pred,
        _marker: std::marker::PhantomData,
    })
}

struct Equals<V> {
    expected: V,
    name: Rc<str>,
}

impl<T, V> ParserNode<T> for Equals<V>
where
    V: PartialEq<Token<T>> + Clone,
{
    type Output = Token<T>;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        true
    }

    fn step(&self, tokens: &[Token<T>], mut state: RunState) -> StepOutcome<Token<T>> {
        let at = state.position;
        match tokens.get(at) {
            Some(tok) if self.expected == *tok => {
                state.position += 1;
                Ok((tok.clone(), state))
            }
            _ => {
                state.record_failure(at, self.name());
                Err(ParserFailure::Backtrack(state))
            }
        }
    }
}

/// Matches a token equal to `expected` by `(type, value)` (positions are
/// ignored, see [`Token`]'s `PartialEq`).
pub fn equals<T: Clone + PartialEq + Debug + 'static>(expected: Token<T>) -> Parser<T, Token<T>> {
    let name: Rc<str> = Rc::from(format!("{:?}", expected.value));
    Parser::from_node(Equals { expected, name })
}

struct ByType<T> {
    ty: T,
    value: Option<String>,
    name: Rc<str>,
}

impl<T: Copy + PartialEq + Clone> ParserNode<T> for ByType<T> {
    type Output = Token<T>;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        true
    }

    fn step(&self, tokens: &[Token<T>], mut state: RunState) -> StepOutcome<Token<T>> {
        let at = state.position;
        let matches = tokens.get(at).map_or(false, |tok| {
            tok.ty == self.ty && self.value.as_deref().map_or(true, |v| v == tok.value)
        });
        if matches {
            state.position += 1;
            Ok((tokens[at].clone(), state))
        } else {
            state.record_failure(at, self.name());
            Err(ParserFailure::Backtrack(state))
        }
    }
}

/// Matches any token of type `ty`, regardless of its text.
pub fn token<T: Copy + Debug + PartialEq + 'static>(ty: T) -> Parser<T, Token<T>> {
    let name: Rc<str> = Rc::from(format!("{:?}", ty));
    Parser::from_node(ByType {
        ty,
        value: None,
        name,
    })
}

/// Matches a token of type `ty` whose text is exactly `value`.
pub fn token_value<T: Copy + Debug + PartialEq + 'static>(
    ty: T,
    value: impl Into<String>,
) -> Parser<T, Token<T>> {
    let value = value.into();
    let name: Rc<str> = Rc::from(format!("{:?}", value));
    Parser::from_node(ByType {
        ty,
        value: Some(value),
        name,
    })
}

struct Pure<V> {
    value: V,
}

impl<T, V: Clone> ParserNode<T> for Pure<V> {
    type Output = V;

    fn name(&self) -> Rc<str> {
        Rc::from("<empty>")
    }

    fn may_halt(&self) -> bool {
        false
    }

    fn step(&self, _tokens: &[Token<T>], state: RunState) -> StepOutcome<V> {
        Ok((self.value.clone(), state))
    }
}

/// Always succeeds without consuming input, producing a clone of `value`.
pub fn pure<T, V: Clone + 'static>(value: V) -> Parser<T, V> {
    Parser::from_node(Pure { value })
}

struct Finished;

impl<T> ParserNode<T> for Finished {
    type Output = ();

    fn name(&self) -> Rc<str> {
        Rc::from("EOF")
    }

    fn may_halt(&self) -> bool {
        false
    }

    fn step(&self, tokens: &[Token<T>], mut state: RunState) -> StepOutcome<()> {
        if state.position == tokens.len() {
            Ok(((), state))
        } else {
            state.record_eof_failure(state.position, self.name());
            Err(ParserFailure::Backtrack(state))
        }
    }
}

/// Succeeds only if every token has been consumed.
pub fn finished<T: 'static>() -> Parser<T, ()> {
    Parser::from_node(Finished)
}
