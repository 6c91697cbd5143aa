//! Configuration types for Trellis diagram processing.
//!
//! This module provides configuration structures that control how
//! diagrams are rendered. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`StyleConfig`] - Visual styling options such as the color theme.
//! - [`Theme`] - The closed set of supported color themes.
//!
//! # Example
//!
//! ```
//! # use trellis::config::{AppConfig, Theme};
//! let config = AppConfig::default();
//! assert_eq!(config.style().theme(), Theme::Default);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified style configuration.
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    /// Color theme applied to rendered output.
    #[serde(default)]
    theme: Theme,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] with the given theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the configured theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

/// Color themes supported by the render targets.
///
/// The set mirrors the themes Mermaid ships; the layout engine target
/// maps them onto its own styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Forest,
    Neutral,
    Base,
}

impl Theme {
    /// Returns the theme name as the render targets spell it.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Forest => "forest",
            Theme::Neutral => "neutral",
            Theme::Base => "base",
        }
    }
}
