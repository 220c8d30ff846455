//! Syntax tree produced by the parser.
//!
//! A [`Node`] is a tagged variant with an ordered list of owned children.
//! Ownership is strictly hierarchical: a child belongs to exactly one parent
//! and dropping the root releases the whole tree once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    CreateDatabase,
    CreateTable,
    DropTable,
    Select,
    Insert,
    Identifier,
    ColumnList,
    ColumnDef,
    WhereClause,
    Literal,
    Operator,
    ValueList,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::CreateDatabase => "CREATE_DATABASE",
            NodeKind::CreateTable => "CREATE_TABLE",
            NodeKind::DropTable => "DROP_TABLE",
            NodeKind::Select => "SELECT",
            NodeKind::Insert => "INSERT",
            NodeKind::Identifier => "IDENTIFIER",
            NodeKind::ColumnList => "COLUMN_LIST",
            NodeKind::ColumnDef => "COLUMN_DEF",
            NodeKind::WhereClause => "WHERE_CLAUSE",
            NodeKind::Literal => "LITERAL",
            NodeKind::Operator => "OPERATOR",
            NodeKind::ValueList => "VALUE_LIST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Textual payload for Identifier/Literal/Operator nodes, stored as an
    /// owned copy decoupled from the token and input lifetimes.
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(kind: NodeKind, text: &str) -> Self {
        Node {
            kind,
            text: Some(text.to_string()),
            children: Vec::new(),
        }
    }

    /// Appends a child; child order encodes statement structure and is
    /// preserved exactly as parsed.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Total number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Indented, human-readable listing of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(self.kind.name());
        if let Some(text) = &self.text {
            out.push_str(": ");
            out.push_str(text);
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let mut root = Node::new(NodeKind::DropTable);
        root.add_child(Node::with_text(NodeKind::Identifier, "users"));
        root
    }

    #[test]
    fn text_is_an_owned_copy() {
        let name = String::from("users");
        let node = Node::with_text(NodeKind::Identifier, &name);
        drop(name);
        assert_eq!(node.text.as_deref(), Some("users"));
    }

    #[test]
    fn child_order_is_preserved() {
        let mut list = Node::new(NodeKind::ColumnList);
        for name in ["a", "b", "c"] {
            list.add_child(Node::with_text(NodeKind::Identifier, name));
        }
        let names: Vec<&str> = list
            .children
            .iter()
            .map(|c| c.text.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn node_count_includes_all_descendants() {
        assert_eq!(sample_tree().node_count(), 2);
    }

    #[test]
    fn render_indents_children() {
        let expected = "DROP_TABLE\n  IDENTIFIER: users\n";
        assert_eq!(sample_tree().render(), expected);
    }
}
