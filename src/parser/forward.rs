use std::cell::RefCell;
use std::rc::Rc;

use super::node::{ParserFailure, ParserNode, RunState, StepOutcome};
use super::{GrammarError, Parser};
use crate::Token;

type Target<T, V> = Rc<RefCell<Option<Parser<T, V>>>>;

struct ForwardNode<T, V> {
    name: Rc<str>,
    target: Target<T, V>,
    redefined: Rc<RefCell<bool>>,
}

impl<T, V> ParserNode<T> for ForwardNode<T, V> {
    type Output = V;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        match self.target.borrow().as_ref() {
            Some(p) => p.may_halt(),
            None => false,
        }
    }

    fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<V> {
        if *self.redefined.borrow() {
            return Err(ParserFailure::Grammar(GrammarError {
                message: format!(
                    "forward declaration '{}' was given more than one .define() call; \
                     a forward declaration may only be defined once",
                    self.name
                ),
            }));
        }
        let target = match self.target.borrow().as_ref() {
            Some(p) => p.clone(),
            None => {
                return Err(ParserFailure::Grammar(GrammarError {
                    message: format!(
                        "forward declaration '{}' was used before .define() was called on it",
                        self.name
                    ),
                }))
            }
        };
        target.step(tokens, state)
    }
}

/// A placeholder for a parser that has not been built yet, used to tie the
/// knot in recursive grammars (e.g. an expression that can itself contain a
/// parenthesized expression). Use the returned [`Parser`] handle freely
/// while building the grammar, then call [`ForwardDecl::define`] exactly
/// once before any call to [`Parser::parse`].
pub struct ForwardDecl<T, V> {
    target: Target<T, V>,
    redefined: Rc<RefCell<bool>>,
    handle: Parser<T, V>,
}

impl<T: 'static, V: 'static> ForwardDecl<T, V> {
    /// Supply the real definition. A forward declaration may only be
    /// defined once: a second call leaves the first definition in place
    /// and marks the declaration so that using it raises a
    /// [`GrammarError`] the next time it's actually invoked during
    /// parsing, the same way an undefined declaration does. Never calling
    /// this before the grammar is run is likewise a programmer error,
    /// surfaced as a `GrammarError` the first time the declaration is
    /// actually invoked.
    pub fn define(&self, parser: Parser<T, V>) {
        if self.target.borrow().is_some() {
            *self.redefined.borrow_mut() = true;
            return;
        }
        *self.target.borrow_mut() = Some(parser);
    }

    /// The placeholder parser to compose into the rest of the grammar.
    pub fn parser(&self) -> Parser<T, V> {
        self.handle.clone()
    }
}

/// Create a forward declaration named `name`. Returns the handle used to
/// `.define()` it later; call [`ForwardDecl::parser`] to get the
/// placeholder [`Parser`] to compose into the grammar immediately.
pub fn forward_decl<T: 'static, V: 'static>(name: impl Into<Rc<str>>) -> ForwardDecl<T, V> {
    let target: Target<T, V> = Rc::new(RefCell::new(None));
    let redefined = Rc::new(RefCell::new(false));
    let handle = Parser::from_node(ForwardNode {
        name: name.into(),
        target: Rc::clone(&target),
        redefined: Rc::clone(&redefined),
    });
    ForwardDecl {
        target,
        redefined,
        handle,
    }
}
