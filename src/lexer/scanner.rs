use crate::lexer::{LexicalError, Position, Span, Token, TokenKind};

/// What a successful match at the current position produced.
enum Scanned {
    Token(TokenKind),
    /// Whitespace or a `{ ... }` comment; consumed but never emitted.
    Trivia,
}

/// Tokenizer plus the single forward-only cursor the parser reads from.
///
/// The whole input is scanned eagerly in [`Scanner::new`]. Text that matches
/// no pattern is skipped and recorded as a [`LexicalError`], so scanning never
/// fails and one bad run never hides the valid tokens after it.
pub struct Scanner {
    input: String,
    current: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
    cursor: usize,
    finished: bool,
    sentinel: Token,
}

impl Scanner {
    pub fn new(input: impl Into<String>) -> Self {
        let mut scanner = Self {
            input: input.into(),
            current: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
            cursor: 0,
            finished: false,
            sentinel: Token::finished(0, Position::start()),
        };
        scanner.scan_all();
        scanner.finished = scanner.tokens.is_empty();
        scanner.sentinel = Token::finished(scanner.current, scanner.current_position());
        scanner
    }

    /// Tokens and lexical errors, both in source order.
    pub fn tokenize(&self) -> (Vec<Token>, Vec<LexicalError>) {
        (self.tokens.clone(), self.errors.clone())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Token under the cursor, or the `Finished` sentinel once exhausted.
    pub fn current(&self) -> &Token {
        if self.finished {
            return &self.sentinel;
        }
        self.tokens.get(self.cursor).unwrap_or(&self.sentinel)
    }

    /// Move the cursor forward one token. Past the last token the cursor is
    /// finished for good.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        } else {
            self.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn scan_all(&mut self) {
        let mut error_start: Option<(usize, Position)> = None;

        while !self.is_at_end() {
            let start = self.current;
            let start_pos = self.current_position();

            match self.scan_lexeme() {
                Some(scanned) => {
                    if let Some((err_start, err_pos)) = error_start.take() {
                        self.record_error(err_start, start, err_pos);
                    }
                    if let Scanned::Token(kind) = scanned {
                        let lexeme = self.input[start..self.current].to_string();
                        tracing::trace!(%kind, %lexeme, "token");
                        self.tokens.push(Token::new(
                            kind,
                            lexeme,
                            Span::new(start, self.current),
                            start_pos,
                        ));
                    }
                }
                None => {
                    error_start.get_or_insert((start, start_pos));
                    self.advance_char();
                }
            }
        }

        if let Some((err_start, err_pos)) = error_start {
            self.record_error(err_start, self.current, err_pos);
        }

        tracing::debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "scan complete"
        );
    }

    fn record_error(&mut self, start: usize, end: usize, pos: Position) {
        let error = LexicalError::new(
            Span::new(start, end),
            pos,
            self.input[start..end].to_string(),
        );
        tracing::debug!(%error, "lexical error");
        self.errors.push(error);
    }

    /// Try every pattern at the current position, in priority order. Leaves
    /// the position untouched when nothing matches.
    fn scan_lexeme(&mut self) -> Option<Scanned> {
        let ch = self.peek()?;

        if ch.is_whitespace() {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance_char();
            }
            return Some(Scanned::Trivia);
        }

        if ch == '{' {
            // Comments do not nest and need their closing brace.
            let close = self.input[self.current..].find('}')?;
            let end = self.current + close + 1;
            while self.current < end {
                self.advance_char();
            }
            return Some(Scanned::Trivia);
        }

        if ch.is_ascii_alphabetic() {
            return Some(Scanned::Token(self.scan_word()));
        }

        if ch.is_ascii_digit() {
            self.scan_number();
            return Some(Scanned::Token(TokenKind::Number));
        }

        let kind = match ch {
            ';' => TokenKind::Semicolon,
            ':' => {
                if self.peek_ahead(1) != Some('=') {
                    return None;
                }
                self.advance_char();
                TokenKind::Assign
            }
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '=' => TokenKind::Equal,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mult,
            '/' => TokenKind::Div,
            '(' => TokenKind::OpenBracket,
            ')' => TokenKind::ClosedBracket,
            _ => return None,
        };
        self.advance_char();
        Some(Scanned::Token(kind))
    }

    /// Identifier or reserved word. A reserved word only counts when it
    /// stands alone, with no word character on either side.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.current;
        let boundary_before = self.input[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));

        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance_char();
        }
        let letters_end = self.current;
        let boundary_after = self.peek().map_or(true, |c| !is_word_char(c));

        if boundary_before && boundary_after {
            if let Some(keyword) = TokenKind::keyword(&self.input[start..letters_end]) {
                return keyword;
            }
        }

        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance_char();
        }
        TokenKind::Identifier
    }

    fn scan_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance_char();
        }

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance_char(); // consume '.'
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance_char();
            }
        }
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.current..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.current..].chars().nth(offset)
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Convenience function for tokenizing input
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexicalError>) {
    Scanner::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_need_whole_words() {
        assert_eq!(
            kinds("if iffy endif end"),
            vec![
                TokenKind::If,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::End
            ]
        );
        assert_eq!(kinds("if_x"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("1if"), vec![TokenKind::Number, TokenKind::Identifier]);
    }

    #[test]
    fn test_else_is_a_keyword() {
        assert_eq!(kinds("else"), vec![TokenKind::Else]);
    }

    #[test]
    fn test_assign_is_distinct_from_equal() {
        assert_eq!(
            kinds("a := b = c"),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Identifier
            ]
        );
    }

    #[test]
    fn test_lone_colon_is_an_error() {
        let (tokens, errors) = tokenize("a : b");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, ":");
    }

    #[test]
    fn test_numbers_with_fraction() {
        let (tokens, errors) = tokenize("3.14 7.");
        assert_eq!(tokens[0].lexeme, "3.14");
        assert_eq!(tokens[1].lexeme, "7");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, Span::new(6, 7));
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers() {
        let (tokens, errors) = tokenize("x := \u{661}\u{662}");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "\u{661}\u{662}");
    }

    #[test]
    fn test_comments_are_discarded() {
        let (tokens, errors) = tokenize("{ read x } write {a}{b} 1");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Write);
    }

    #[test]
    fn test_unterminated_comment_degrades_to_error() {
        let (tokens, errors) = tokenize("{ x");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "{");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, "x");
    }

    #[test]
    fn test_adjacent_bad_chars_merge_into_one_span() {
        let (tokens, errors) = tokenize("x @#$ y");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "@#$");
        assert_eq!(errors[0].span, Span::new(2, 5));
    }

    #[test]
    fn test_trailing_error_is_recorded() {
        let (_, errors) = tokenize("x:=1?");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "?");
    }

    #[test]
    fn test_positions_track_lines() {
        let (tokens, errors) = tokenize("read x;\n  write @x");
        assert_eq!(tokens[3].pos, Position::new(2, 3));
        assert_eq!(errors[0].pos, Position::new(2, 9));
    }

    #[test]
    fn test_cursor_reports_finished_forever() {
        let mut scanner = Scanner::new("read x");
        assert_eq!(scanner.current().kind, TokenKind::Read);
        scanner.advance();
        assert_eq!(scanner.current().lexeme, "x");
        scanner.advance();
        assert!(scanner.is_finished());
        assert_eq!(scanner.current().kind, TokenKind::Finished);
        scanner.advance();
        assert_eq!(scanner.current().kind, TokenKind::Finished);
    }

    #[test]
    fn test_empty_input_starts_finished() {
        let scanner = Scanner::new("  { nothing here }\n");
        assert!(scanner.tokens().is_empty());
        assert!(!scanner.has_errors());
        assert_eq!(scanner.current().kind, TokenKind::Finished);
    }
}
