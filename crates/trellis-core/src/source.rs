//! The immutable diagram source value produced by extraction.

/// Where the diagram text was found in the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The whole input was taken verbatim as diagram text.
    Inline,
    /// The text was unwrapped from a markdown fenced code block.
    MarkdownBlock,
}

/// A piece of diagram source text, created once at ingestion and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource {
    raw_text: String,
    origin: Origin,
}

impl DiagramSource {
    /// Creates a new diagram source value.
    pub fn new(raw_text: impl Into<String>, origin: Origin) -> Self {
        Self {
            raw_text: raw_text.into(),
            origin,
        }
    }

    /// Returns the literal diagram text.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Returns where the text was found in the raw input.
    pub fn origin(&self) -> Origin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let source = DiagramSource::new("digraph G {}", Origin::Inline);
        assert_eq!(source.raw_text(), "digraph G {}");
        assert_eq!(source.origin(), Origin::Inline);
    }
}
