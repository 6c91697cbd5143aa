//! The closed set of diagram dialects recognized by the pipeline.
//!
//! Three textual notations are distinguished: Mermaid (per-kind root
//! keywords), PlantUML (`@start*`/`@end*` block markers), and Graphviz
//! DOT (the native graph-description language). Detection failure is an
//! error, not a fourth variant; callers never receive a guessed dialect.

use std::fmt;

use serde::Deserialize;

/// A recognized diagram dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Flowchart/sequence/state-style notation with per-kind root keywords.
    Mermaid,
    /// UML-like notation delimited by `@start*`/`@end*` block markers.
    PlantUml,
    /// Native node/edge graph-description language (DOT).
    Graphviz,
}

impl Dialect {
    /// Resolves a markdown fence language hint to a dialect.
    ///
    /// Aliases are case-insensitive: `dot` and `graphviz` and `gv` all map
    /// to [`Dialect::Graphviz`]; `uml` and `puml` map to
    /// [`Dialect::PlantUml`].
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::dialect::Dialect;
    ///
    /// assert_eq!(Dialect::from_alias("DOT"), Some(Dialect::Graphviz));
    /// assert_eq!(Dialect::from_alias("puml"), Some(Dialect::PlantUml));
    /// assert_eq!(Dialect::from_alias("rust"), None);
    /// ```
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_ascii_lowercase().as_str() {
            "mermaid" => Some(Dialect::Mermaid),
            "plantuml" | "uml" | "puml" => Some(Dialect::PlantUml),
            "dot" | "graphviz" | "gv" => Some(Dialect::Graphviz),
            _ => None,
        }
    }

    /// Returns the canonical lowercase name of the dialect.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Mermaid => "mermaid",
            Dialect::PlantUml => "plantuml",
            Dialect::Graphviz => "graphviz",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
