use std::ops::Shr;
use std::rc::Rc;

use super::node::{ParserNode, RunState, StepOutcome};
use super::Parser;
use crate::Token;

struct Map<T, A, B, F> {
    inner: Parser<T, A>,
    f: F,
    _marker: std::marker::PhantomData<fn(A) -> B>,
}

impl<T, A, B, F> ParserNode<T> for Map<T, A, B, F>
where
    F: Fn(A) -> B,
{
    type Output = B;

    fn name(&self) -> Rc<str> {
        self.inner.name()
    }

    fn may_halt(&self) -> bool {
        self.inner.may_halt()
    }

    fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<B> {
        let (a, state) = self.inner.step(tokens, state)?;
        Ok(((self.f)(a), state))
    }
}

impl<T: 'static, A: 'static> Parser<T, A> {
    /// Transform a successful result with `f`. Failure passes through
    /// unchanged.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> Parser<T, B> {
        Parser::from_node(Map {
            inner: self,
            f,
            _marker: std::marker::PhantomData,
        })
    }
}

impl<T: 'static, A: 'static, B: 'static, F: Fn(A) -> B + 'static> Shr<F> for Parser<T, A> {
    type Output = Parser<T, B>;

    /// `p >> f` is [`Parser::map`] as an operator, mirroring `+` for
    /// sequencing and `|` for alternation.
    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}
