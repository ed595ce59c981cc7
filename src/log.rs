use std::fmt::{Debug, Display, Formatter};

/// Debug verbosity assigned to a [`crate::lexer::Tokenizer`] or a
/// [`crate::parser::Parser`] via `.set_log(...)`.
///
/// A no-op in release builds; in debug builds each level only prints what
/// the level below it already prints plus one more kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Log<T> {
    /// Nothing is printed.
    None,
    /// Only the furthest-reached failure is printed.
    Default(T),
    /// `Default`, plus every successful match.
    Success(T),
    /// `Success`, plus the final accept/reject result of a top-level call.
    Result(T),
    /// `Result`, plus every attempt (including ones that are later
    /// abandoned by backtracking).
    Verbose(T),
}

impl<T> Log<T> {
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}
