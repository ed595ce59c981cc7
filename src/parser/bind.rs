use std::rc::Rc;

use super::node::{ParserNode, RunState, StepOutcome};
use super::Parser;
use crate::Token;

struct Bind<T, A, B, F> {
    name: Rc<str>,
    inner: Parser<T, A>,
    f: F,
    _marker: std::marker::PhantomData<fn(A) -> Parser<T, B>>,
}

impl<T, A, B, F> ParserNode<T> for Bind<T, A, B, F>
where
    F: Fn(A) -> Parser<T, B>,
{
    type Output = B;

    fn name(&self) -> Rc<str> {
        self.name.clone()
    }

    /// A sound but conservative approximation: if `inner` is guaranteed to
    /// consume a token, so is the whole bind, regardless of what `f`
    /// produces. If `inner` might not consume anything, whether the bound
    /// parser always does depends on `f`'s result, which can't be known
    /// without running it — so this reports `false` even in grammars where
    /// it would actually be safe.
    fn may_halt(&self) -> bool {
        self.inner.may_halt()
    }

    fn step(&self, tokens: &[Token<T>], state: RunState) -> StepOutcome<B> {
        let (a, state) = self.inner.step(tokens, state)?;
        let next = (self.f)(a);
        next.step(tokens, state)
    }
}

/// Run `p`, then use its result to build and immediately run the next
/// parser. The primary combinators (`+`, `|`, `many`, ...) cover most
/// grammars more directly; reach for `bind` when a later part of the
/// grammar genuinely depends on an earlier parsed value (e.g. matching a
/// closing delimiter to the specific opening one that was read).
///
/// `bind(p, f)`'s [`Parser::may_halt`] is approximated from `p` alone:
/// it reports `true` when `p` is guaranteed to consume a token, and
/// `false` otherwise, even in cases where the parser `f` builds would
/// also always consume. `f` can't be inspected without a value to call it
/// with, so this narrowing is one-directional — it never calls a
/// genuinely non-halting bind safe, but it can reject a `many`/`oneplus`
/// wrapping a `bind` that would, in practice, always make progress (e.g.
/// `bind(maybe(x), |_| token(Y))`, where `p` alone may not consume but
/// every `f` result does). Route around it by restructuring the grammar
/// so the token that's guaranteed to consume comes from `p` itself.
pub fn bind<T: 'static, A: 'static, B: 'static>(
    p: Parser<T, A>,
    f: impl Fn(A) -> Parser<T, B> + 'static,
) -> Parser<T, B> {
    let name = p.name();
    Parser::from_node(Bind {
        name,
        inner: p,
        f,
        _marker: std::marker::PhantomData,
    })
}
