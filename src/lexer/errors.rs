use thiserror::Error;

/// Position in source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A maximal run of source text that matched no token pattern.
///
/// Lexical errors never stop the scanner; they are collected alongside the
/// tokens and it is up to the caller whether to go on and parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized text '{text}' at {pos}")]
pub struct LexicalError {
    pub span: Span,
    pub pos: Position,
    pub text: String,
}

impl LexicalError {
    pub fn new(span: Span, pos: Position, text: String) -> Self {
        Self { span, pos, text }
    }
}
