//! Recursive-descent parser combinators (spec component A): build a
//! [`Parser`] out of primitives and combinators, then run it over a token
//! slice with [`Parser::parse`].
//!
//! Every parser call either succeeds, consuming zero or more tokens, or
//! fails without side effects other than updating the "furthest position
//! reached" bookkeeping used for error messages. Failure is not an
//! exception: combinators like `|` and `maybe` catch it and try something
//! else. Only the failure that survives all the way back to [`Parser::parse`]
//! is turned into a [`ParserError`]. [`GrammarError`] is different: it means
//! the grammar itself is malformed (an unbounded repetition, or an
//! undefined forward declaration) and is never caught by any combinator.

mod alt;
mod bind;
mod forward;
mod map;
mod maybe;
mod node;
mod primitives;
mod repeat;
mod seq;

use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use node::{ParserFailure, ParserNode, RunState, StepOutcome};

use crate::{Log, Token};

pub use forward::{forward_decl, ForwardDecl};
pub use primitives::{any, equals, finished, pure, satisfy, token, token_value};
pub use repeat::{many, oneplus};
pub use maybe::maybe;
pub use bind::bind;
pub use seq::{between, skip, Skipped};
pub use alt::alt;

/// A reusable, named parser. Cheap to clone (an `Rc` under the hood); build
/// a grammar once and clone the handles you need.
///
/// Carries its own debug-log setting ([`Parser::set_log`]), shared across
/// every clone of this handle, the same way [`crate::lexer::Tokenizer`]
/// carries one for the lexer side.
pub struct Parser<T, V> {
    inner: Rc<dyn ParserNode<T, Output = V>>,
    debugger: Rc<OnceCell<Log<&'static str>>>,
}

impl<T, V> Clone for Parser<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            debugger: Rc::clone(&self.debugger),
        }
    }
}

impl<T, V> Parser<T, V> {
    pub(crate) fn from_node(node: impl ParserNode<T, Output = V> + 'static) -> Self {
        Self {
            inner: Rc::new(node),
            debugger: Rc::new(OnceCell::new()),
        }
    }

    /// The name used in auto-derived composite names and in "expected: ..."
    /// error messages.
    pub fn name(&self) -> Rc<str> {
        self.inner.name()
    }

    /// Whether every successful run of this parser consumes at least one
    /// token. `many`/`oneplus` refuse to wrap a parser for which this is
    /// `false`, since it would let them loop forever.
    pub fn may_halt(&self) -> bool {
        self.inner.may_halt()
    }

    /// Override the name reported in error messages and used when this
    /// parser is itself composed into a larger auto-derived name.
    pub fn named(self, name: impl Into<Rc<str>>) -> Self {
        Self::from_node(Named {
            inner: self.inner,
            name: name.into(),
        })
    }

    /// Assign a debug verbosity to this parser, printed (in debug builds
    /// only) every time this exact handle is invoked as part of a larger
    /// grammar: entry at [`Log::Verbose`], success at [`Log::Success`],
    /// furthest-reached failure at [`Log::Default`]. May only be called
    /// once per handle; a second call returns an error naming the level
    /// already set, the same contract as [`crate::lexer::Tokenizer::set_log`].
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(log)
            .map_err(|err| format!("log label {} is already assigned", err))
    }

    /// Run this parser once, applying this handle's own log setting around
    /// the underlying node. Every combinator calls this (rather than the
    /// raw trait-level `step`) on its sub-parsers so that `.set_log` takes
    /// effect no matter how deeply this handle is nested in a grammar.
    pub(crate) fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<V> {
        let debug = self.debugger.get().copied().unwrap_or(Log::None);

        if cfg!(debug_assertions) && debug.order() >= Log::Verbose(()).order() {
            println!("[{}; attempt] '{}' at {}", debug, self.name(), state.position);
        }

        match self.inner.step(tokens, state) {
            Ok((value, new_state)) => {
                if cfg!(debug_assertions) && debug.order() >= Log::Success(()).order() {
                    println!(
                        "[{}; success] '{}' consumed up to {}",
                        debug,
                        self.name(),
                        new_state.position
                    );
                }
                Ok((value, new_state))
            }
            Err(ParserFailure::Backtrack(new_state)) => {
                if cfg!(debug_assertions) && debug.order() >= Log::Default(()).order() {
                    println!(
                        "[{}; failure] '{}' at {}, furthest reached {}",
                        debug,
                        self.name(),
                        new_state.position,
                        new_state.max_position
                    );
                }
                Err(ParserFailure::Backtrack(new_state))
            }
            Err(err @ ParserFailure::Grammar(_)) => Err(err),
        }
    }
}

impl<T: Clone + fmt::Debug, V> Parser<T, V> {
    /// Run this parser against the whole of `tokens`.
    ///
    /// Trailing unconsumed tokens are not an error by themselves; wrap the
    /// grammar with [`finished`] (via `+`) if the whole input must be
    /// consumed.
    pub fn parse(&self, tokens: &[Token<T>]) -> Result<V, ParseFailure<T>> {
        match self.step(tokens, RunState::start()) {
            Ok((value, _)) => Ok(value),
            Err(ParserFailure::Grammar(err)) => Err(ParseFailure::Grammar(err)),
            Err(ParserFailure::Backtrack(state)) => {
                Err(ParseFailure::Syntax(build_parser_error(tokens, state)))
            }
        }
    }
}

struct Named<T, V> {
    inner: Rc<dyn ParserNode<T, Output = V>>,
    name: Rc<str>,
}

impl<T, V> ParserNode<T> for Named<T, V> {
    type Output = V;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    fn may_halt(&self) -> bool {
        self.inner.may_halt()
    }

    fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<V> {
        self.inner.step(tokens, state)
    }
}

/// Everything that can go wrong running a [`Parser`]: either the input
/// didn't match the grammar ([`ParserError`]), or the grammar itself is
/// malformed ([`GrammarError`]).
#[derive(Debug)]
pub enum ParseFailure<T: fmt::Debug> {
    Syntax(ParserError<T>),
    Grammar(GrammarError),
}

impl<T: fmt::Debug> fmt::Display for ParseFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Syntax(err) => write!(f, "{}", err),
            ParseFailure::Grammar(err) => write!(f, "{}", err),
        }
    }
}

/// Raised when no path through the grammar accepts the input. Carries the
/// furthest position any branch reached and what was expected there, which
/// is usually the most useful error to show a user even when several other
/// branches failed earlier.
#[derive(Debug)]
pub struct ParserError<T: fmt::Debug> {
    pub pointer: usize,
    pub position: Option<crate::Position>,
    pub expected: Vec<Rc<str>>,
    pub found: Option<Token<T>>,
    pub message: String,
}

impl<T: fmt::Debug> fmt::Display for ParserError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParserError: {}", self.message)
    }
}

/// Raised when a grammar is malformed in a way no input could ever fix:
/// `many`/`oneplus` applied to a parser that can succeed without consuming
/// a token, or a [`ForwardDecl`] used without ever calling `.define`.
///
/// Unlike a parse failure, this is never recovered by `|` or `maybe` — it
/// always propagates straight out of [`Parser::parse`].
#[derive(Debug, Clone)]
pub struct GrammarError {
    pub message: String,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GrammarError: {}", self.message)
    }
}

fn build_parser_error<T: Clone + fmt::Debug>(tokens: &[Token<T>], state: RunState) -> ParserError<T> {
    let expected = state.expected_at_max;
    let eof_at_max = state.eof_at_max;
    let found = tokens.get(state.max_position).cloned();

    let message = match &found {
        // Only `finished()` itself tags its failures this way (see
        // `RunState::record_eof_failure`), so a grammar's own token type
        // named e.g. `EOF` can never be mistaken for it here.
        Some(tok) if expected.len() == 1 && eof_at_max => {
            format!("should have reached <EOF>: {}", tok.value)
        }
        Some(tok) => format!(
            "got unexpected token: {}, expected: {}",
            tok.value,
            join_expected(&expected)
        ),
        None => format!(
            "got unexpected end of input, expected: {}",
            join_expected(&expected)
        ),
    };

    ParserError {
        pointer: state.max_position,
        position: found
            .as_ref()
            .map(|tok| tok.start)
            .or_else(|| tokens.last().map(|tok| tok.end)),
        expected,
        found,
        message,
    }
}

fn join_expected(names: &[Rc<str>]) -> String {
    names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(" or ")
}
