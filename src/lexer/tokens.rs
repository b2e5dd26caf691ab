use crate::lexer::{Position, Span};
use std::fmt;

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Reserved words
    If,
    Then,
    Else,
    End,
    Repeat,
    Until,
    Read,
    Write,

    // Punctuation
    Semicolon,          // ;
    Assign,             // :=
    OpenBracket,        // (
    ClosedBracket,      // )

    // Relational operators
    LessThan,           // <
    GreaterThan,        // >
    Equal,              // =

    // Arithmetic operators
    Plus,               // +
    Minus,              // -
    Mult,               // *
    Div,                // /

    // Literals and identifiers
    Number,
    Identifier,

    // Reported by the cursor once the token stream is exhausted
    Finished,
}

impl TokenKind {
    /// Reserved word lookup. Only whole words reach this.
    pub fn keyword(s: &str) -> Option<Self> {
        match s {
            "if" => Some(TokenKind::If),
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "end" => Some(TokenKind::End),
            "repeat" => Some(TokenKind::Repeat),
            "until" => Some(TokenKind::Until),
            "read" => Some(TokenKind::Read),
            "write" => Some(TokenKind::Write),
            _ => None,
        }
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, TokenKind::LessThan | TokenKind::GreaterThan | TokenKind::Equal)
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenKind::Mult | TokenKind::Div)
    }

    /// Tokens that may legally follow a statement sequence.
    pub fn ends_stmt_seq(&self) -> bool {
        matches!(
            self,
            TokenKind::End | TokenKind::Else | TokenKind::Until | TokenKind::Finished
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Until => "UNTIL",
            TokenKind::Read => "READ",
            TokenKind::Write => "WRITE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Assign => "ASSIGN",
            TokenKind::OpenBracket => "OPENBRACKET",
            TokenKind::ClosedBracket => "CLOSEDBRACKET",
            TokenKind::LessThan => "LESSTHAN",
            TokenKind::GreaterThan => "GREATERTHAN",
            TokenKind::Equal => "EQUAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mult => "MULT",
            TokenKind::Div => "DIV",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Finished => "FINISHED",
        };
        write!(f, "{}", s)
    }
}

/// A token with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, span: Span, pos: Position) -> Self {
        Self {
            kind,
            lexeme,
            span,
            pos,
        }
    }

    /// The sentinel handed out once the cursor runs past the last token.
    pub fn finished(offset: usize, pos: Position) -> Self {
        Self::new(TokenKind::Finished, String::new(), Span::new(offset, offset), pos)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} , {}", self.lexeme, self.kind)
    }
}
