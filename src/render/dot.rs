use crate::parser::{Shape, SyntaxNode};

/// Graphviz attribute for a node's rendering shape.
pub fn node_attributes(node: &SyntaxNode) -> &'static str {
    match node.shape() {
        Shape::Statement => "shape=polygon",
        Shape::Expression => "shape=ellipse",
    }
}

/// Export a syntax tree as a Graphviz `digraph`.
///
/// Node labels double as node ids, which is why they have to be unique
/// within a tree. Nodes come first in pre-order, then one edge per
/// parent/child pair.
pub fn to_dot(root: &SyntaxNode) -> String {
    let mut out = String::new();
    for line in dot_lines(root) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn dot_lines(root: &SyntaxNode) -> Vec<String> {
    let nodes = root.walk();
    let mut lines = vec!["digraph tree {".to_string()];

    for node in &nodes {
        lines.push(format!("    {} [{}];", quote(&node.label), node_attributes(node)));
    }
    for node in &nodes {
        for child in &node.children {
            lines.push(format!("    {} -> {};", quote(&node.label), quote(&child.label)));
        }
    }

    lines.push("}".to_string());
    lines
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
