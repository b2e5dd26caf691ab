//! Scan-then-parse pipeline used by front ends.
//!
//! Lexical errors block parsing entirely, and an input with no tokens at all
//! is reported as empty rather than handed to the parser.

use crate::lexer::{LexicalError, Scanner, Token};
use crate::parser::{ParseError, Parser, SyntaxNode};
use thiserror::Error;

/// Why an analysis produced no syntax tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Enter code first: the input contains no tokens")]
    EmptyInput,

    #[error("{count} lexical error(s); fix them before parsing")]
    Lexical { count: usize },

    #[error(transparent)]
    Syntax(#[from] ParseError),
}

/// Everything a front end needs after running a source text.
#[derive(Debug)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub lexical_errors: Vec<LexicalError>,
    pub tree: Result<SyntaxNode, AnalysisError>,
}

impl Analysis {
    /// 1-based lines holding a lexical error, in source order.
    pub fn error_lines(&self) -> Vec<usize> {
        self.lexical_errors.iter().map(|e| e.pos.line).collect()
    }

    pub fn is_success(&self) -> bool {
        self.tree.is_ok()
    }
}

/// Scan `source` and, when it is lexically clean and non-empty, parse it.
pub fn analyze(source: &str) -> Analysis {
    let scanner = Scanner::new(source);
    let (tokens, lexical_errors) = scanner.tokenize();

    let tree = if !lexical_errors.is_empty() {
        tracing::debug!(count = lexical_errors.len(), "skipping parse: lexical errors");
        Err(AnalysisError::Lexical {
            count: lexical_errors.len(),
        })
    } else if tokens.is_empty() {
        Err(AnalysisError::EmptyInput)
    } else {
        Parser::new(scanner).parse().map_err(AnalysisError::from)
    };

    Analysis {
        tokens,
        lexical_errors,
        tree,
    }
}

/// Show each lexical error under its source line with a caret underline.
pub fn annotate(source: &str, errors: &[LexicalError]) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut out = String::new();

    for error in errors {
        out.push_str(&format!("error: {}\n", error));

        let Some(line) = lines.get(error.pos.line - 1) else {
            continue;
        };
        let gutter = error.pos.line.to_string();
        let width = error.text.chars().count().max(1);

        out.push_str(&format!("{} | {}\n", gutter, line));
        out.push_str(&format!(
            "{} | {}{}\n",
            " ".repeat(gutter.len()),
            " ".repeat(error.pos.column - 1),
            "^".repeat(width)
        ));
    }

    out
}
