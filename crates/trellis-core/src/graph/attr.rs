//! Node and edge attributes with a fixed canonical emission order.
//!
//! Attribute key-value pairs are always serialized in the order
//! shape, style, label, fill (nodes) and arrowhead, style, label (edges)
//! so that identical programs serialize to byte-identical output.

use std::fmt;

/// Node shapes understood by the downstream layout engine.
///
/// The set is closed: every shape a conversion rule can assign is listed
/// here, and each maps to one DOT shape token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Record,
    Ellipse,
    Cylinder,
    Component,
    Note,
    Box3d,
    Folder,
    /// Closest DOT polygon to a cloud outline; used for cloud stereotypes.
    Egg,
    /// Initial-state marker in state diagrams.
    Point,
    /// Final-state marker in state diagrams.
    DoubleCircle,
}

impl Shape {
    /// Returns the DOT shape token.
    pub fn as_dot(&self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Record => "record",
            Shape::Ellipse => "ellipse",
            Shape::Cylinder => "cylinder",
            Shape::Component => "component",
            Shape::Note => "note",
            Shape::Box3d => "box3d",
            Shape::Folder => "folder",
            Shape::Egg => "egg",
            Shape::Point => "point",
            Shape::DoubleCircle => "doublecircle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_dot())
    }
}

/// Node style tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    Filled,
    Rounded,
    Dashed,
}

impl NodeStyle {
    pub fn as_dot(&self) -> &'static str {
        match self {
            NodeStyle::Filled => "filled",
            NodeStyle::Rounded => "rounded",
            NodeStyle::Dashed => "dashed",
        }
    }
}

/// Edge line styles. A solid edge carries no style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Dashed,
    Dotted,
}

impl EdgeStyle {
    pub fn as_dot(&self) -> &'static str {
        match self {
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Dotted => "dotted",
        }
    }
}

/// Arrowhead styles derived from relationship tokens.
///
/// A plain association carries no arrowhead attribute (DOT's default
/// `normal` head).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    /// Hollow triangle; inheritance and realization.
    Empty,
    /// Filled diamond; composition.
    Diamond,
    /// Hollow diamond; aggregation.
    ODiamond,
    /// Open head; dependencies and async messages.
    Open,
    /// No head; undirected links.
    None,
}

impl ArrowHead {
    pub fn as_dot(&self) -> &'static str {
        match self {
            ArrowHead::Empty => "empty",
            ArrowHead::Diamond => "diamond",
            ArrowHead::ODiamond => "odiamond",
            ArrowHead::Open => "open",
            ArrowHead::None => "none",
        }
    }
}

/// Attributes attached to a node declaration.
///
/// Fields are emitted in declaration order below; that order is the
/// canonical one and must not be reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttrs {
    pub shape: Option<Shape>,
    pub style: Option<NodeStyle>,
    pub label: Option<String>,
    pub fill: Option<&'static str>,
}

impl NodeAttrs {
    /// Attributes consisting of a shape only.
    pub fn shaped(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_fill(mut self, fill: &'static str) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_none() && self.style.is_none() && self.label.is_none() && self.fill.is_none()
    }

    /// Serializes to a bracketed DOT attribute list, or an empty string
    /// when no attribute is set.
    pub(crate) fn to_dot(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(shape) = self.shape {
            pairs.push(format!("shape={}", shape.as_dot()));
        }
        if let Some(style) = self.style {
            pairs.push(format!("style={}", style.as_dot()));
        }
        if let Some(label) = &self.label {
            pairs.push(format!("label=\"{}\"", escape(label)));
        }
        if let Some(fill) = self.fill {
            pairs.push(format!("fillcolor={}", fill));
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", pairs.join(", "))
        }
    }
}

/// Attributes attached to an edge declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeAttrs {
    pub arrowhead: Option<ArrowHead>,
    pub style: Option<EdgeStyle>,
    pub label: Option<String>,
}

impl EdgeAttrs {
    pub fn with_arrowhead(mut self, head: ArrowHead) -> Self {
        self.arrowhead = Some(head);
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn to_dot(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(head) = self.arrowhead {
            pairs.push(format!("arrowhead={}", head.as_dot()));
        }
        if let Some(style) = self.style {
            pairs.push(format!("style={}", style.as_dot()));
        }
        if let Some(label) = &self.label {
            pairs.push(format!("label=\"{}\"", escape(label)));
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", pairs.join(", "))
        }
    }
}

/// Escapes a string for use inside a double-quoted DOT token.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}
