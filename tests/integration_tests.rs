use std::collections::HashSet;
use std::fs;

use tempfile::tempdir;

use tiny_parser::analysis::{analyze, AnalysisError};
use tiny_parser::lexer::{tokenize, Scanner, Span, TokenKind};
use tiny_parser::parser::{NodeKind, ParseError, Parser, Shape, SyntaxNode};
use tiny_parser::render::{to_dot, GraphvizRenderer, RenderError};

/// Helper function to scan and parse a TINY program
fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    Parser::new(Scanner::new(source)).parse()
}

fn child_labels(node: &SyntaxNode) -> Vec<&str> {
    node.children.iter().map(|c| c.label.as_str()).collect()
}

const FACTORIAL: &str = "\
{ Sample program in TINY language - computes factorial }
read x; { input an integer }
if 0 < x then { don't compute if x <= 0 }
  fact := 1;
  repeat
    fact := fact * x;
    x := x - 1
  until x = 0;
  write fact  { output factorial of x }
end
";

#[test]
fn test_assignment_tokens_and_tree() {
    let (tokens, errors) = tokenize("x:=1;");
    assert!(errors.is_empty());
    let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::Identifier, "x"),
            (TokenKind::Assign, ":="),
            (TokenKind::Number, "1"),
            (TokenKind::Semicolon, ";"),
        ]
    );

    let tree = parse("x:=1;").expect("Failed to parse x:=1;");
    assert_eq!(tree.label, "stmt_seq");
    assert_eq!(child_labels(&tree), vec!["assign (x)"]);
    assert_eq!(child_labels(&tree.children[0]), vec!["const (1)"]);
}

#[test]
fn test_if_without_else() {
    let tree = parse("if x then y:=1 end").expect("Failed to parse if statement");
    let if_node = &tree.children[0];
    assert_eq!(if_node.label, "if");
    assert_eq!(child_labels(if_node), vec!["id (x)", "stmt_seq #2"]);

    let body = &if_node.children[1];
    assert_eq!(child_labels(body), vec!["assign (y)"]);
    assert_eq!(child_labels(&body.children[0]), vec!["const (1)"]);
}

#[test]
fn test_bad_character_is_skipped() {
    let (tokens, errors) = tokenize("x:=@1;");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Semicolon
        ]
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span, Span::new(3, 4));
    assert_eq!(errors[0].text, "@");
}

#[test]
fn test_missing_end_is_fatal() {
    let err = parse("if x then y:=1").unwrap_err();
    assert_eq!(
        err,
        ParseError::ExpectedToken {
            expected: TokenKind::End,
            found: TokenKind::Finished,
            lexeme: String::new(),
            pos: err.pos(),
        }
    );
    assert!(err.to_string().starts_with("Can't match (END)"));
}

#[test]
fn test_left_associative_chain() {
    let tree = parse("write 1+2-3").expect("Failed to parse expression");
    let op = &tree.children[0].children[0];
    assert_eq!(op.label, "op (-)");
    assert_eq!(child_labels(op), vec!["op (+)", "const (3)"]);
    assert_eq!(child_labels(&op.children[0]), vec!["const (1)", "const (2)"]);
}

#[test]
fn test_repeated_statements_get_unique_labels() {
    let tree = parse("write 1; write 2").expect("Failed to parse writes");
    assert_eq!(child_labels(&tree), vec!["write", "write #2"]);
}

#[test]
fn test_every_label_is_unique() {
    let tree = parse(FACTORIAL).expect("Failed to parse factorial");
    let labels: Vec<_> = tree.walk().iter().map(|n| n.label.clone()).collect();
    let unique: HashSet<_> = labels.iter().collect();
    assert_eq!(labels.len(), unique.len());
    assert_eq!(labels.len(), tree.node_count());
}

#[test]
fn test_factorial_program_shape() {
    let tree = parse(FACTORIAL).expect("Failed to parse factorial");
    assert_eq!(child_labels(&tree), vec!["read (x)", "if"]);

    let if_node = &tree.children[1];
    assert_eq!(if_node.children[0].label, "op (<)");

    let body = &if_node.children[1];
    assert_eq!(child_labels(body), vec!["assign (fact)", "repeat", "write"]);

    let repeat = &body.children[1];
    assert_eq!(repeat.children[0].children.len(), 2);
    assert_eq!(repeat.children[1].label, "op (=)");
}

#[test]
fn test_else_branch_is_reachable() {
    let tree = parse("if x = 1 then write 1 else write 2 end").expect("Failed to parse if/else");
    let if_node = &tree.children[0];
    assert_eq!(if_node.children.len(), 3);
    assert_eq!(child_labels(&if_node.children[2]), vec!["write #2"]);
}

#[test]
fn test_parsing_is_deterministic() {
    let first = parse(FACTORIAL).expect("Failed to parse factorial");
    let second = parse(FACTORIAL).expect("Failed to parse factorial");
    assert_eq!(first, second);
}

#[test]
fn test_second_parse_sees_exhausted_cursor() {
    let mut parser = Parser::new(Scanner::new("write 1"));
    let tree = parser.parse().expect("Failed to parse write");
    assert_eq!(tree.label, "stmt_seq");

    let err = parser.parse().unwrap_err();
    assert_eq!(err.found(), TokenKind::Finished);
}

#[test]
fn test_statement_classification() {
    let tree = parse(FACTORIAL).expect("Failed to parse factorial");
    for node in tree.walk() {
        let expected = match node.kind {
            NodeKind::If | NodeKind::Repeat | NodeKind::Assign | NodeKind::Read | NodeKind::Write => {
                Shape::Statement
            }
            _ => Shape::Expression,
        };
        assert_eq!(node.shape(), expected, "wrong shape for {}", node.label);
    }
}

#[test]
fn test_analysis_refuses_to_parse_bad_input() {
    let analysis = analyze("x:=@1;");
    assert_eq!(analysis.tree, Err(AnalysisError::Lexical { count: 1 }));
    assert_eq!(analysis.error_lines(), vec![1]);

    let analysis = analyze("x:=1;");
    assert!(analysis.is_success());
}

#[test]
fn test_dot_export_lists_every_node() {
    let tree = parse(FACTORIAL).expect("Failed to parse factorial");
    let dot = to_dot(&tree);
    assert!(dot.starts_with("digraph tree {"));
    assert!(dot.contains("\"assign (fact)\" [shape=polygon];"));
    assert!(dot.contains("\"op (*)\" [shape=ellipse];"));
    assert!(dot.contains("\"repeat\" -> \"stmt_seq #3\";"));
    assert_eq!(dot.matches("->").count(), tree.node_count() - 1);
}

#[test]
fn test_missing_renderer_is_distinct() {
    let dir = tempdir().expect("Failed to create temp dir");
    let tree = parse("write 1").expect("Failed to parse write");

    let renderer = GraphvizRenderer::new(dir.path().join("no-such-dot"));
    let output = dir.path().join("tree.png");
    let err = renderer.render(&tree, &output).unwrap_err();

    assert!(matches!(err, RenderError::RendererMissing { .. }));
    assert!(fs::metadata(&output).is_err());
}

#[cfg(unix)]
#[test]
fn test_failing_renderer_reports_its_stderr() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("Failed to create temp dir");
    let stub = dir.path().join("failing-dot");
    fs::write(&stub, "#!/bin/sh\necho 'Format: \"nope\" not recognized' >&2\nexit 1\n")
        .expect("Failed to write renderer stub");
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755))
        .expect("Failed to make renderer stub executable");

    // Large enough that the stub exits long before the DOT text is written.
    let source: Vec<String> = (0..4000).map(|i| format!("write x{i}")).collect();
    let tree = parse(&source.join(";\n")).expect("Failed to parse writes");

    let renderer = GraphvizRenderer::new(&stub).with_format("nope");
    let err = renderer.render(&tree, &dir.path().join("tree.nope")).unwrap_err();

    match err {
        RenderError::RendererFailed { stderr, .. } => {
            assert_eq!(stderr, "Format: \"nope\" not recognized");
        }
        other => panic!("Expected RendererFailed, got {other:?}"),
    }
}
