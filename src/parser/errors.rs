use thiserror::Error;
use crate::lexer::{Position, TokenKind};

/// Parser error types
///
/// Every variant is fatal: the parse stops at the first one and no partial
/// tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Can't match ({expected}): found {found} '{lexeme}' at {pos}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        pos: Position,
    },

    #[error("Can't assemble a statement: found {found} '{lexeme}' at {pos}")]
    ExpectedStatement {
        found: TokenKind,
        lexeme: String,
        pos: Position,
    },

    #[error("Can't match (IDENTIFIER), (NUMBER) or (OPENBRACKET): found {found} '{lexeme}' at {pos}")]
    ExpectedFactor {
        found: TokenKind,
        lexeme: String,
        pos: Position,
    },

    #[error("Unexpected {found} '{lexeme}' after the end of the program at {pos}")]
    TrailingInput {
        found: TokenKind,
        lexeme: String,
        pos: Position,
    },
}

impl ParseError {
    /// Position of the token the parser stopped at.
    pub fn pos(&self) -> Position {
        match self {
            ParseError::ExpectedToken { pos, .. }
            | ParseError::ExpectedStatement { pos, .. }
            | ParseError::ExpectedFactor { pos, .. }
            | ParseError::TrailingInput { pos, .. } => *pos,
        }
    }

    /// Kind of the token the parser stopped at.
    pub fn found(&self) -> TokenKind {
        match self {
            ParseError::ExpectedToken { found, .. }
            | ParseError::ExpectedStatement { found, .. }
            | ParseError::ExpectedFactor { found, .. }
            | ParseError::TrailingInput { found, .. } => *found,
        }
    }
}
