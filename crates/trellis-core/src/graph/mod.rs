//! The graph-description program: the intermediate representation of
//! transpiled diagrams and its deterministic DOT serializer.
//!
//! A [`GraphProgram`] is an ordered sequence of statements: node
//! declarations, edge declarations, and clusters holding nested
//! statements. Serialization preserves declaration order, emits attribute
//! pairs in a fixed canonical order, and numbers clusters in emission
//! order, so identical programs always serialize to byte-identical text.

mod attr;
mod builder;

pub use attr::{ArrowHead, EdgeAttrs, EdgeStyle, NodeAttrs, NodeStyle, Shape};
pub use builder::{GraphBuilder, GraphError};

use std::fmt::{self, Write as _};

use crate::identifier::Id;

use attr::escape;

/// Layout direction for the whole graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    /// Left to right; used for sequence-style diagrams.
    LeftRight,
    /// Top to bottom (DOT's default, emitted explicitly when requested).
    TopBottom,
}

impl RankDir {
    pub fn as_dot(&self) -> &'static str {
        match self {
            RankDir::LeftRight => "LR",
            RankDir::TopBottom => "TB",
        }
    }
}

/// A node declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStmt {
    pub id: Id,
    pub attrs: NodeAttrs,
}

/// An edge declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStmt {
    pub from: Id,
    pub to: Id,
    pub attrs: EdgeAttrs,
}

/// A cluster statement holding nested statements.
///
/// Clusters have no source-level identifier; the serializer assigns
/// `cluster_<n>` names in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterStmt {
    pub label: String,
    pub statements: Vec<Statement>,
}

/// One statement of a graph program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Node(NodeStmt),
    Edge(EdgeStmt),
    Cluster(ClusterStmt),
}

/// An ordered, finalized graph-description program.
///
/// Obtained from [`GraphBuilder::finish`]; every edge endpoint is
/// guaranteed to have a node declaration somewhere in the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphProgram {
    pub(crate) name: Id,
    pub(crate) rankdir: Option<RankDir>,
    pub(crate) node_defaults: Option<NodeAttrs>,
    pub(crate) statements: Vec<Statement>,
}

impl GraphProgram {
    /// Returns the graph name.
    pub fn name(&self) -> Id {
        self.name
    }

    /// Returns the top-level statements in declaration order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Serializes the program to DOT text.
    ///
    /// The output is deterministic: statement order is declaration order,
    /// attributes are emitted in canonical order, and clusters are numbered
    /// sequentially.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        let mut cluster_counter = 0usize;

        writeln!(out, "digraph {} {{", self.name).expect("writing to String is infallible");
        if let Some(rankdir) = self.rankdir {
            writeln!(out, "  rankdir={};", rankdir.as_dot())
                .expect("writing to String is infallible");
        }
        if let Some(defaults) = &self.node_defaults {
            let rendered = defaults.to_dot();
            if !rendered.is_empty() {
                // to_dot() yields " [...]"; reuse the bracket body for the
                // node defaults statement.
                writeln!(out, "  node{};", rendered).expect("writing to String is infallible");
            }
        }
        for statement in &self.statements {
            write_statement(&mut out, statement, 1, &mut cluster_counter);
        }
        out.push('}');
        out
    }
}

impl fmt::Display for GraphProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dot())
    }
}

fn write_statement(out: &mut String, statement: &Statement, depth: usize, counter: &mut usize) {
    let indent = "  ".repeat(depth);
    match statement {
        Statement::Node(node) => {
            writeln!(out, "{}\"{}\"{};", indent, escape(&node.id.resolve()), node.attrs.to_dot())
                .expect("writing to String is infallible");
        }
        Statement::Edge(edge) => {
            writeln!(
                out,
                "{}\"{}\" -> \"{}\"{};",
                indent,
                escape(&edge.from.resolve()),
                escape(&edge.to.resolve()),
                edge.attrs.to_dot()
            )
            .expect("writing to String is infallible");
        }
        Statement::Cluster(cluster) => {
            let number = *counter;
            *counter += 1;
            writeln!(out, "{}subgraph cluster_{} {{", indent, number)
                .expect("writing to String is infallible");
            writeln!(out, "{}  label=\"{}\";", indent, escape(&cluster.label))
                .expect("writing to String is infallible");
            for nested in &cluster.statements {
                write_statement(out, nested, depth + 1, counter);
            }
            writeln!(out, "{}}}", indent).expect("writing to String is infallible");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program() -> GraphProgram {
        let mut builder = GraphBuilder::new("classes");
        builder.set_node_defaults(
            NodeAttrs::shaped(Shape::Record)
                .with_style(NodeStyle::Filled)
                .with_fill("white"),
        );
        builder.declare_node(
            "Animal".into(),
            NodeAttrs::shaped(Shape::Record).with_label("Animal"),
        );
        builder.declare_node(
            "Dog".into(),
            NodeAttrs::shaped(Shape::Record).with_label("Dog"),
        );
        builder.add_edge(
            "Dog".into(),
            "Animal".into(),
            EdgeAttrs::default().with_arrowhead(ArrowHead::Empty),
        );
        builder.finish().unwrap()
    }

    #[test]
    fn test_serialization_shape() {
        let dot = sample_program().to_dot();
        let expected = "digraph classes {\n  node [shape=record, style=filled, fillcolor=white];\n  \"Animal\" [shape=record, label=\"Animal\"];\n  \"Dog\" [shape=record, label=\"Dog\"];\n  \"Dog\" -> \"Animal\" [arrowhead=empty];\n}";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let program = sample_program();
        assert_eq!(program.to_dot(), program.to_dot());
        assert_eq!(sample_program().to_dot(), program.to_dot());
    }

    #[test]
    fn test_nested_clusters_are_numbered_in_emission_order() {
        let mut builder = GraphBuilder::new("g");
        builder.open_cluster("outer");
        builder.open_cluster("inner");
        builder.declare_node("a".into(), NodeAttrs::default());
        builder.close_cluster().unwrap();
        builder.close_cluster().unwrap();
        builder.open_cluster("second");
        builder.close_cluster().unwrap();

        let dot = builder.finish().unwrap().to_dot();
        // Outer cluster is emitted first, its nested cluster next.
        assert!(dot.find("cluster_0").unwrap() < dot.find("cluster_1").unwrap());
        assert!(dot.contains("cluster_2"));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn escaped_labels_never_break_quoting(label in "[ -~]{0,40}") {
                let mut builder = GraphBuilder::new("g");
                builder.declare_node(
                    "n".into(),
                    NodeAttrs::shaped(Shape::Box).with_label(label.clone()),
                );
                let dot = builder.finish().unwrap().to_dot();

                // Every quote inside the emitted label must be escaped, so
                // stripping escaped sequences leaves balanced quoting.
                let stripped = dot.replace("\\\\", "").replace("\\\"", "");
                prop_assert_eq!(stripped.matches('"').count() % 2, 0);
            }

            #[test]
            fn serialization_is_idempotent(names in proptest::collection::vec("[a-zA-Z][a-zA-Z0-9_]{0,8}", 1..8)) {
                let mut builder = GraphBuilder::new("g");
                builder.set_default_shape(Shape::Box);
                for pair in names.windows(2) {
                    builder.add_edge(
                        pair[0].as_str().into(),
                        pair[1].as_str().into(),
                        EdgeAttrs::default(),
                    );
                }
                let program = builder.finish().unwrap();
                prop_assert_eq!(program.to_dot(), program.to_dot());
            }
        }
    }

    #[test]
    fn test_rankdir_emitted_before_statements() {
        let mut builder = GraphBuilder::new("sequence");
        builder.set_rankdir(RankDir::LeftRight);
        builder.declare_node("Alice".into(), NodeAttrs::default());
        let dot = builder.finish().unwrap().to_dot();
        assert!(dot.starts_with("digraph sequence {\n  rankdir=LR;\n"));
    }
}
