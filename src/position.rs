use once_cell::unsync::OnceCell;
use std::fmt::{Display, Formatter};

/// A 1-origin (line, column) location in source text.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Tracks byte offsets of line breaks in a source string so that
/// `Position`s can be recovered from a byte pointer without rescanning
/// the whole text on every lookup.
pub(crate) struct Code<'c> {
    pub value: &'c str,
    line_breaks: OnceCell<Vec<usize>>,
}

impl<'c> Code<'c> {
    pub fn new(value: &'c str) -> Self {
        Self {
            value,
            line_breaks: OnceCell::new(),
        }
    }

    fn line_breaks(&self) -> &Vec<usize> {
        self.line_breaks.get_or_init(|| {
            self.value
                .bytes()
                .enumerate()
                .filter_map(|(index, b)| if b == b'\n' { Some(index) } else { None })
                .collect()
        })
    }

    /// Resolve the `Position` of the byte offset `pointer` (one-past-the-end
    /// positions, used for end-of-input reporting, are valid too).
    pub fn position_at(&self, pointer: usize) -> Position {
        let line_breaks = self.line_breaks();
        let index = match line_breaks.binary_search(&pointer) {
            Ok(index) | Err(index) => index,
        };

        if index == 0 {
            Position::new(1, self.value[..pointer].chars().count() + 1)
        } else {
            let break_point = line_breaks[index - 1] + 1;
            Position::new(
                index + 1,
                self.value[break_point..pointer].chars().count() + 1,
            )
        }
    }
}
