//! CLI logic for the Trellis diagram tool.
//!
//! This module contains the core CLI logic for the Trellis diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;
use std::io::{self, Write as _};

use log::info;

use trellis::{Pipeline, TrellisError};

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline
/// and writes the render payload to the output file, or to stdout when
/// no output path is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Extraction, detection, and transpilation errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(input_path = args.input; "Processing diagram");

    let app_config = config::load_config(args.config.as_ref())?;

    let input = fs::read_to_string(&args.input)?;

    let pipeline = Pipeline::new(app_config);
    let rendering = pipeline.run(&input)?;

    info!(
        dialect = rendering.dialect().name(),
        engine:? = rendering.plan().engine();
        "Render plan assembled"
    );

    match &args.output {
        Some(path) => {
            fs::write(path, rendering.plan().payload())?;
            info!(output_file = path; "Render payload written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendering.plan().payload().as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
