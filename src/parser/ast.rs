use std::fmt;

/// Grammar construct a node was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    StmtSeq,
    If,
    Repeat,
    Assign,
    Read,
    Write,
    Op,
    Const,
    Id,
}

impl NodeKind {
    /// Label stem shared by every node of this kind.
    pub fn stem(&self) -> &'static str {
        match self {
            NodeKind::StmtSeq => "stmt_seq",
            NodeKind::If => "if",
            NodeKind::Repeat => "repeat",
            NodeKind::Assign => "assign",
            NodeKind::Read => "read",
            NodeKind::Write => "write",
            NodeKind::Op => "op",
            NodeKind::Const => "const",
            NodeKind::Id => "id",
        }
    }

    /// Base label before disambiguation, e.g. `assign (x)` or `op (+)`.
    pub fn base_label(&self, lexeme: Option<&str>) -> String {
        match lexeme {
            Some(lexeme) => format!("{} ({})", self.stem(), lexeme),
            None => self.stem().to_string(),
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::If | NodeKind::Repeat | NodeKind::Assign | NodeKind::Read | NodeKind::Write
        )
    }
}

/// Rendering shape picked by the tree consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Statement,
    Expression,
}

/// A node of the syntax tree.
///
/// Children are owned and attached when the node is built, so a node is
/// reachable from exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub label: String,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, label: String) -> Self {
        Self {
            kind,
            label,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, label: String, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            label,
            children,
        }
    }

    pub fn push_child(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn shape(&self) -> Shape {
        if self.kind.is_statement() {
            Shape::Statement
        } else {
            Shape::Expression
        }
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn walk(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SyntaxNode::node_count).sum::<usize>()
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(depth), self.label)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
