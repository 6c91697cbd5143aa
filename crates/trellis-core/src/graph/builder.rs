//! Incremental construction of [`GraphProgram`]s.
//!
//! The builder tracks a stack of open clusters and the set of declared
//! node identifiers. Edge endpoints that were never declared explicitly
//! are declared implicitly, with the builder's default shape, at their
//! first reference; this upholds the program invariant that every edge
//! endpoint is declared before serialization.

use indexmap::IndexSet;
use log::debug;
use thiserror::Error;

use crate::identifier::Id;

use super::{
    ClusterStmt, EdgeStmt, GraphProgram, NodeStmt, RankDir, Statement,
    attr::{EdgeAttrs, NodeAttrs, Shape},
};

/// Structural errors raised while assembling a graph program.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A cluster was closed without a matching open.
    #[error("container close without a matching open")]
    UnbalancedClose,

    /// One or more clusters were still open when the program was finished.
    #[error("{0} container(s) left open")]
    UnclosedClusters(usize),
}

/// Builder for [`GraphProgram`]s.
///
/// # Examples
///
/// ```
/// use trellis_core::graph::{GraphBuilder, NodeAttrs, EdgeAttrs, Shape};
///
/// let mut builder = GraphBuilder::new("classes");
/// builder.set_default_shape(Shape::Record);
/// builder.declare_node("Animal".into(), NodeAttrs::shaped(Shape::Record));
/// builder.add_edge("Dog".into(), "Animal".into(), EdgeAttrs::default());
///
/// let program = builder.finish().unwrap();
/// assert!(program.to_dot().contains("\"Dog\" -> \"Animal\""));
/// ```
#[derive(Debug)]
pub struct GraphBuilder {
    name: Id,
    rankdir: Option<RankDir>,
    node_defaults: Option<NodeAttrs>,
    default_shape: Option<Shape>,
    root: Vec<Statement>,
    open: Vec<ClusterStmt>,
    declared: IndexSet<Id>,
}

impl GraphBuilder {
    /// Creates a builder for a directed graph with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            rankdir: None,
            node_defaults: None,
            default_shape: None,
            root: Vec::new(),
            open: Vec::new(),
            declared: IndexSet::new(),
        }
    }

    /// Sets the layout direction emitted as a `rankdir` attribute.
    pub fn set_rankdir(&mut self, rankdir: RankDir) {
        self.rankdir = Some(rankdir);
    }

    /// Sets graph-wide node default attributes (`node [...]` statement).
    pub fn set_node_defaults(&mut self, defaults: NodeAttrs) {
        self.node_defaults = Some(defaults);
    }

    /// Sets the shape assigned to implicitly declared edge endpoints.
    pub fn set_default_shape(&mut self, shape: Shape) {
        self.default_shape = Some(shape);
    }

    /// Returns true if the node has already been declared.
    pub fn is_declared(&self, id: Id) -> bool {
        self.declared.contains(&id)
    }

    /// Declares a node in the current scope.
    ///
    /// A repeated declaration of the same identifier is ignored; the first
    /// declaration wins. Returns whether the node was newly declared.
    pub fn declare_node(&mut self, id: Id, attrs: NodeAttrs) -> bool {
        if !self.declared.insert(id) {
            debug!(node = id.resolve(); "Ignoring duplicate node declaration");
            return false;
        }
        self.push(Statement::Node(NodeStmt { id, attrs }));
        true
    }

    /// Adds an edge, implicitly declaring undeclared endpoints first.
    pub fn add_edge(&mut self, from: Id, to: Id, attrs: EdgeAttrs) {
        self.ensure_declared(from);
        self.ensure_declared(to);
        self.push(Statement::Edge(EdgeStmt { from, to, attrs }));
    }

    /// Opens a cluster; subsequent statements nest inside it until closed.
    pub fn open_cluster(&mut self, label: impl Into<String>) {
        self.open.push(ClusterStmt {
            label: label.into(),
            statements: Vec::new(),
        });
    }

    /// Closes the innermost open cluster.
    pub fn close_cluster(&mut self) -> Result<(), GraphError> {
        let cluster = self.open.pop().ok_or(GraphError::UnbalancedClose)?;
        self.push(Statement::Cluster(cluster));
        Ok(())
    }

    /// Finalizes the program.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnclosedClusters`] when container opens were
    /// not balanced by closes.
    pub fn finish(self) -> Result<GraphProgram, GraphError> {
        if !self.open.is_empty() {
            return Err(GraphError::UnclosedClusters(self.open.len()));
        }
        Ok(GraphProgram {
            name: self.name,
            rankdir: self.rankdir,
            node_defaults: self.node_defaults,
            statements: self.root,
        })
    }

    fn ensure_declared(&mut self, id: Id) {
        if self.declared.contains(&id) {
            return;
        }
        let attrs = match self.default_shape {
            Some(shape) => NodeAttrs::shaped(shape),
            None => NodeAttrs::default(),
        };
        self.declare_node(id, attrs);
    }

    fn push(&mut self, statement: Statement) {
        match self.open.last_mut() {
            Some(cluster) => cluster.statements.push(statement),
            None => self.root.push(statement),
        }
    }
}
