use crate::lexer::TokenKind;
use crate::parser::expressions::Parser;
use crate::parser::{NodeKind, ParseError, SyntaxNode};

impl Parser {
    /// stmt_seq = statement { ";" statement }
    ///
    /// A `;` directly before the end of a sequence is accepted, so `x:=1;`
    /// is a complete program.
    pub(crate) fn stmt_seq(&mut self) -> Result<SyntaxNode, ParseError> {
        let label = self.label(NodeKind::StmtSeq, None);
        let mut seq = SyntaxNode::new(NodeKind::StmtSeq, label);

        seq.push_child(self.statement()?);
        while self.check(TokenKind::Semicolon) {
            self.expect(TokenKind::Semicolon)?;
            if self.peek().kind.ends_stmt_seq() {
                break;
            }
            seq.push_child(self.statement()?);
        }

        Ok(seq)
    }

    /// Parse a statement
    pub(crate) fn statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::If => self.if_stmt(),
            TokenKind::Repeat => self.repeat_stmt(),
            TokenKind::Identifier => self.assign_stmt(),
            TokenKind::Read => self.read_stmt(),
            TokenKind::Write => self.write_stmt(),
            found => {
                let token = self.peek();
                Err(ParseError::ExpectedStatement {
                    found,
                    lexeme: token.lexeme.clone(),
                    pos: token.pos,
                })
            }
        }
    }

    /// if_stmt = "if" exp "then" stmt_seq [ "else" stmt_seq ] "end"
    ///
    /// The condition may sit inside one pair of brackets.
    fn if_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::If)?;
        let label = self.label(NodeKind::If, None);
        let mut node = SyntaxNode::new(NodeKind::If, label);

        if self.check(TokenKind::OpenBracket) {
            self.expect(TokenKind::OpenBracket)?;
            node.push_child(self.exp()?);
            self.expect(TokenKind::ClosedBracket)?;
        } else {
            node.push_child(self.exp()?);
        }

        self.expect(TokenKind::Then)?;
        node.push_child(self.stmt_seq()?);

        if self.check(TokenKind::Else) {
            self.expect(TokenKind::Else)?;
            node.push_child(self.stmt_seq()?);
        }
        self.expect(TokenKind::End)?;

        Ok(node)
    }

    /// repeat_stmt = "repeat" stmt_seq "until" exp
    fn repeat_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::Repeat)?;
        let label = self.label(NodeKind::Repeat, None);
        let mut node = SyntaxNode::new(NodeKind::Repeat, label);

        node.push_child(self.stmt_seq()?);
        self.expect(TokenKind::Until)?;
        node.push_child(self.exp()?);

        Ok(node)
    }

    /// assign_stmt = IDENTIFIER ":=" exp
    fn assign_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        let target = self.lexeme();
        let label = self.label(NodeKind::Assign, Some(&target));
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;

        let value = self.exp()?;
        Ok(SyntaxNode::with_children(NodeKind::Assign, label, vec![value]))
    }

    /// read_stmt = "read" IDENTIFIER
    fn read_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::Read)?;
        let target = self.lexeme();
        let label = self.label(NodeKind::Read, Some(&target));
        self.expect(TokenKind::Identifier)?;

        Ok(SyntaxNode::new(NodeKind::Read, label))
    }

    /// write_stmt = "write" exp
    fn write_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::Write)?;
        let label = self.label(NodeKind::Write, None);

        let value = self.exp()?;
        Ok(SyntaxNode::with_children(NodeKind::Write, label, vec![value]))
    }
}
