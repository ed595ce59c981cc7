//! A library to build recursive-descent LL(*) parsers from small composable
//! combinators, plus a regex-based lexer generator to produce the token
//! stream they consume.
//!
//! # Overview
//!
//! A grammar is assembled from a handful of primitives ([`parser::any`],
//! [`parser::satisfy`], [`parser::equals`], [`parser::token`],
//! [`parser::pure`], [`parser::finished`]) combined with operators:
//! `+` to sequence two parsers into a pair, `&` to extend an existing
//! tuple by one more slot without nesting it, `|` to try an alternative,
//! `>>` to map a result, and the [`parser::many`], [`parser::oneplus`],
//! [`parser::maybe`] repetition combinators. Recursive grammars are wired up
//! with [`parser::forward_decl`].
//!
//! Tokens are produced separately by [`lexer::make_tokenizer`], which
//! compiles an ordered list of `(name, regex)` rules into a lazy token
//! iterator with exact line/column tracking.
//!
//! # Example
//!
//! ```
//! use descent::lexer::{make_tokenizer, LexerRule};
//! use descent::parser::{many, token};
//! use descent::Token;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Tok {
//!     Space,
//!     Word,
//!     Comma,
//! }
//!
//! let tokenizer = make_tokenizer(vec![
//!     LexerRule::skip(Tok::Space, r"^[ \t]+").unwrap(),
//!     LexerRule::new(Tok::Word, r"^[a-zA-Z]+").unwrap(),
//!     LexerRule::new(Tok::Comma, r"^,").unwrap(),
//! ]);
//!
//! let tokens: Vec<Token<Tok>> = tokenizer
//!     .tokenize("red, green, blue")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! let word = token(Tok::Word);
//! let comma = token(Tok::Comma);
//! let list = (word.clone() + many(comma + word)).named("list");
//!
//! let (first, _rest) = list.parse(&tokens).unwrap();
//! assert_eq!(first.value, "red");
//! ```
mod log;
mod position;
mod token;

pub mod lexer;
pub mod parser;
pub mod tree;

pub use log::Log;
pub use position::Position;
pub use token::Token;
