//! Source coordinates.
//!
//! A [`Position`] names one character in one source file. The lexer advances
//! a position one character at a time; every token and AST node stores its
//! own copies of the positions covering its span.
//!
//! Positions are copy-on-branch: `clone()` yields an independent coordinate,
//! and advancing one clone never affects another. The filename and source
//! text are shared immutably behind `Arc<str>` so clones stay cheap.

use std::fmt;
use std::sync::Arc;

/// A source coordinate: byte/char index plus human line and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Character offset from the start of the source, zero-based.
    pub index: usize,
    /// Line number, zero-based. Incremented on `'\n'`.
    pub line: usize,
    /// Column number, zero-based. Reset on `'\n'`.
    pub column: usize,
    /// Name of the source file (or a pseudo-name like `<repl>`).
    pub filename: Arc<str>,
    /// Full source text, kept for diagnostic excerpts.
    pub source: Arc<str>,
}

impl Position {
    /// Position at the start of `source`.
    pub fn start(filename: impl Into<Arc<str>>, source: impl Into<Arc<str>>) -> Self {
        Position {
            index: 0,
            line: 0,
            column: 0,
            filename: filename.into(),
            source: source.into(),
        }
    }

    /// Advance past one character, tracking line/column.
    pub fn advance(&mut self, ch: char) {
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based for humans.
        write!(f, "{}:{}:{}", self.filename, self.line + 1, self.column + 1)
    }
}
