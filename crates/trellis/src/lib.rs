//! Trellis - diagram dialect detection and rendering orchestration.
//!
//! Trellis takes raw diagram text (or markdown embedding it), works out
//! which notation it is written in, transpiles a supported PlantUML
//! subset into Graphviz DOT, and produces a render plan naming the
//! engine that should draw it. It never guesses: unrecognized input and
//! unsupported constructs fail with structured diagnostics instead of
//! degraded output.

pub mod config;

mod error;
mod orchestrate;

pub use trellis_core::{dialect, graph, identifier, source};

pub use error::TrellisError;
pub use orchestrate::{Engine, RenderPlan};

use log::{debug, info};

use trellis_core::dialect::Dialect;

use config::AppConfig;

/// Pipeline for processing diagram input into a render plan.
///
/// # Examples
///
/// ```
/// use trellis::{Engine, Pipeline, config::AppConfig};
///
/// let input = "```plantuml\n@startuml\nclass A\nclass B\nA <|-- B\n@enduml\n```";
///
/// let pipeline = Pipeline::new(AppConfig::default());
/// let rendering = pipeline.run(input).expect("Failed to process diagram");
///
/// assert_eq!(rendering.plan().engine(), Engine::GraphLayout);
/// assert!(rendering.plan().payload().starts_with("digraph classes {"));
/// ```
#[derive(Default)]
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Process raw input into a render plan.
    ///
    /// Runs extraction, dialect detection, and (for PlantUML)
    /// transpilation, then assembles the plan for the matching engine.
    /// The same input always yields the same plan.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Parse` when the input is empty, no dialect
    /// matches, or the PlantUML body contains unsupported constructs.
    pub fn run(&self, input: &str) -> Result<Rendering, TrellisError> {
        info!("Processing diagram input");

        let source = trellis_parser::extract(input)
            .map_err(|err| TrellisError::new_parse_error(err, input))?;
        let text = source.raw_text();

        let detection = trellis_parser::detect(text)
            .map_err(|err| TrellisError::new_parse_error(err, text))?;
        let dialect = detection.dialect();
        debug!(
            dialect = dialect.name(),
            origin:? = source.origin(),
            rationale = detection.rationale();
            "Dialect detected"
        );

        let converted = match dialect {
            Dialect::PlantUml => {
                let program = trellis_parser::transpile(text)
                    .map_err(|err| TrellisError::new_parse_error(err, text))?;
                Some(program.to_dot())
            }
            Dialect::Mermaid | Dialect::Graphviz => None,
        };

        let theme = self.config.style().theme();
        let plan = RenderPlan::for_rendering(dialect, text, converted, theme);

        debug!("Render plan assembled");
        Ok(Rendering { dialect, plan })
    }
}

/// The outcome of a pipeline run: the detected dialect and the plan to
/// render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    dialect: Dialect,
    plan: RenderPlan,
}

impl Rendering {
    /// The dialect the input was classified as.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The assembled render plan.
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }
}
