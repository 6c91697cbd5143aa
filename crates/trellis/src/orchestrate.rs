//! Render orchestration: choosing an engine and assembling its payload.
//!
//! The orchestrator never renders anything itself. It decides which
//! engine a dialect belongs to and packages the text that engine should
//! receive, with the configured theme applied. Mermaid text goes to the
//! Mermaid engine untouched apart from a theme directive; PlantUML is
//! transpiled to DOT upstream and, like native Graphviz input, goes to
//! the graph layout engine.

use trellis_core::dialect::Dialect;

use crate::config::Theme;

/// The render engine a plan targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Mermaid's own renderer; consumes Mermaid text verbatim.
    MermaidNative,
    /// A DOT-compatible layout engine; consumes Graphviz text.
    GraphLayout,
}

impl Engine {
    /// The engine matching a dialect. PlantUML reaches the layout
    /// engine through transpiled DOT.
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Mermaid => Engine::MermaidNative,
            Dialect::PlantUml | Dialect::Graphviz => Engine::GraphLayout,
        }
    }
}

/// A fully assembled render plan: one engine, one payload, one theme.
///
/// The plan also retains the original diagram source so front ends can
/// offer it for download or copying regardless of what the engine
/// receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    engine: Engine,
    payload: String,
    source: String,
    theme: Theme,
}

impl RenderPlan {
    /// Assembles the plan for a detected dialect.
    ///
    /// `converted` carries the transpiled DOT text when the dialect
    /// required conversion; dialects the engines consume natively pass
    /// `None` and the source text becomes the payload.
    pub fn for_rendering(
        dialect: Dialect,
        source: &str,
        converted: Option<String>,
        theme: Theme,
    ) -> Self {
        match (dialect, converted) {
            (Dialect::Mermaid, _) => Self::mermaid(source, theme),
            (_, Some(dot)) => {
                let mut plan = Self::graph_layout(dot, theme);
                plan.source = source.to_owned();
                plan
            }
            (_, None) => Self::graph_layout(source, theme),
        }
    }

    /// Plans a native Mermaid render.
    ///
    /// Non-default themes are injected as an `%%{init}%%` directive in
    /// front of the diagram text, the way Mermaid expects per-diagram
    /// theming.
    pub fn mermaid(text: &str, theme: Theme) -> Self {
        let payload = match theme {
            Theme::Default => text.to_owned(),
            other => format!("%%{{init: {{'theme': '{}'}}}}%%\n{}", other.name(), text),
        };
        Self {
            engine: Engine::MermaidNative,
            payload,
            source: text.to_owned(),
            theme,
        }
    }

    /// Plans a graph layout render from DOT text.
    pub fn graph_layout(dot: impl Into<String>, theme: Theme) -> Self {
        let payload = dot.into();
        Self {
            engine: Engine::GraphLayout,
            source: payload.clone(),
            payload,
            theme,
        }
    }

    /// The engine this plan targets.
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// The text handed to the engine.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The original diagram source, untouched by theming or conversion.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The theme the engine should apply.
    pub fn theme(&self) -> Theme {
        self.theme
    }
}
