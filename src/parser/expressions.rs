use crate::lexer::{Scanner, Token, TokenKind};
use crate::parser::{LabelCounter, NodeKind, ParseError, SyntaxNode};

/// Predictive recursive-descent parser over a [`Scanner`]'s token cursor.
///
/// Every rule decides on the current token alone and the first mismatch
/// aborts the parse. Recursion depth follows the nesting depth of the source
/// and is not capped.
pub struct Parser {
    scanner: Scanner,
    labels: LabelCounter,
}

impl Parser {
    #[must_use]
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            labels: LabelCounter::new(),
        }
    }

    /// Get reference to the underlying scanner
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Parse the whole program into a tree rooted at a `stmt_seq` node.
    ///
    /// Label counters start from zero on every call. The cursor is never
    /// rewound, so a second call only sees what the first left behind.
    pub fn parse(&mut self) -> Result<SyntaxNode, ParseError> {
        self.labels.reset();
        tracing::debug!(tokens = self.scanner.tokens().len(), "parse started");

        let root = self.stmt_seq()?;

        if !self.check(TokenKind::Finished) {
            let token = self.peek();
            return Err(ParseError::TrailingInput {
                found: token.kind,
                lexeme: token.lexeme.clone(),
                pos: token.pos,
            });
        }

        tracing::debug!(nodes = root.node_count(), "parse finished");
        Ok(root)
    }

    /// Peek at current token without consuming it
    pub(crate) fn peek(&self) -> &Token {
        self.scanner.current()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the expected kind.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        let token = self.peek();
        if token.kind == expected {
            tracing::trace!(kind = %expected, lexeme = %token.lexeme, "matched");
            self.scanner.advance();
            Ok(())
        } else {
            Err(ParseError::ExpectedToken {
                expected,
                found: token.kind,
                lexeme: token.lexeme.clone(),
                pos: token.pos,
            })
        }
    }

    /// Claim a unique label for a node about to be built.
    pub(crate) fn label(&mut self, kind: NodeKind, lexeme: Option<&str>) -> String {
        self.labels.claim(kind.base_label(lexeme))
    }

    /// Lexeme of the current token, cloned so the cursor can move on.
    pub(crate) fn lexeme(&self) -> String {
        self.peek().lexeme.clone()
    }

    /// exp = simple_exp { ("=" | "<" | ">") simple_exp }
    pub(crate) fn exp(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_chain(TokenKind::is_relational, Self::simple_exp)
    }

    /// simple_exp = term { ("+" | "-") term }
    fn simple_exp(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_chain(TokenKind::is_additive, Self::term)
    }

    /// term = factor { ("*" | "/") factor }
    fn term(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_chain(TokenKind::is_multiplicative, Self::factor)
    }

    /// Left-associative fold: each operator takes the tree built so far as
    /// its left child and the next operand as its right child.
    fn binary_chain(
        &mut self,
        is_operator: fn(&TokenKind) -> bool,
        operand: fn(&mut Self) -> Result<SyntaxNode, ParseError>,
    ) -> Result<SyntaxNode, ParseError> {
        let mut left = operand(self)?;

        while is_operator(&self.peek().kind) {
            let symbol = self.lexeme();
            let label = self.label(NodeKind::Op, Some(&symbol));
            let kind = self.peek().kind;
            self.expect(kind)?;

            let right = operand(self)?;
            left = SyntaxNode::with_children(NodeKind::Op, label, vec![left, right]);
        }

        Ok(left)
    }

    /// factor = "(" exp ")" | NUMBER | IDENTIFIER
    fn factor(&mut self) -> Result<SyntaxNode, ParseError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::OpenBracket => {
                self.expect(TokenKind::OpenBracket)?;
                let inner = self.exp()?;
                self.expect(TokenKind::ClosedBracket)?;
                Ok(inner)
            }
            TokenKind::Number => {
                let value = self.lexeme();
                let label = self.label(NodeKind::Const, Some(&value));
                self.expect(TokenKind::Number)?;
                Ok(SyntaxNode::new(NodeKind::Const, label))
            }
            TokenKind::Identifier => {
                let name = self.lexeme();
                let label = self.label(NodeKind::Id, Some(&name));
                self.expect(TokenKind::Identifier)?;
                Ok(SyntaxNode::new(NodeKind::Id, label))
            }
            found => {
                let token = self.peek();
                Err(ParseError::ExpectedFactor {
                    found,
                    lexeme: token.lexeme.clone(),
                    pos: token.pos,
                })
            }
        }
    }
}
