//! The lexer generator (spec component B): compiles an ordered list of
//! `(name, regex)` rules into a tokenizer that lazily emits [`crate::Token`]s
//! carrying exact source positions.

mod error;
mod rule;
mod tokenizer;

pub use error::LexerError;
pub use rule::LexerRule;
pub use tokenizer::{make_tokenizer, TokenIter, Tokenizer};
