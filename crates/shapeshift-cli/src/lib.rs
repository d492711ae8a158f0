//! CLI logic for the Shapeshift tool.
//!
//! Parses a shapes document, prints its outline, and optionally writes an SVG
//! rendering of the tree.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs::{self, File},
    io::{self, Write},
};

use log::{debug, info};

use shapeshift::{Container, ShapeshiftBuilder, ShapeshiftError};

/// Document parsed when no text or file is given.
pub const SAMPLE_DOCUMENT: &str = "[12](BALL(INK[1[35]](CHARLIE)))";

/// Run the Shapeshift CLI application
///
/// Parses the document selected by `args`, writes its outline to `out`, and
/// writes an SVG file when an output path is given.
///
/// # Errors
///
/// Returns `ShapeshiftError` for configuration, I/O, or parse failures.
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), ShapeshiftError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ShapeshiftBuilder::new(app_config);

    let container = parse_input(&builder, args)?;

    out.write_all(builder.render_outline(&container).as_bytes())?;

    if let Some(output) = &args.output {
        let svg = builder.render_svg(&container);
        fs::write(output, svg)?;
        info!(output_file = output; "SVG exported successfully");
    }

    Ok(())
}

/// Run the Shapeshift CLI application, printing the outline to stdout.
///
/// # Errors
///
/// See [`run_with_output`].
pub fn run(args: &Args) -> Result<(), ShapeshiftError> {
    run_with_output(args, &mut io::stdout().lock())
}

fn parse_input(builder: &ShapeshiftBuilder, args: &Args) -> Result<Container, ShapeshiftError> {
    match (&args.text, &args.file) {
        (Some(text), _) => {
            info!(source = "argument"; "Processing document");
            builder.parse(text)
        }
        (None, Some(path)) => {
            info!(source = "file", path; "Processing document");
            let file = File::open(path)?;
            builder
                .parse_reader(file)
                .map_err(|err| attach_file_source(err, path))
        }
        (None, None) => {
            info!(source = "sample"; "Processing document");
            builder.parse(SAMPLE_DOCUMENT)
        }
    }
}

/// Streamed parse errors carry no text; reload the file so the diagnostic can
/// point into it.
fn attach_file_source(err: ShapeshiftError, path: &str) -> ShapeshiftError {
    match err {
        ShapeshiftError::Parse { err, src } if src.is_empty() => match fs::read_to_string(path) {
            Ok(src) => ShapeshiftError::new_parse_error(err, src),
            Err(read_err) => {
                debug!(path, err:% = read_err; "Could not reload document for diagnostics");
                ShapeshiftError::new_parse_error(err, src)
            }
        },
        other => other,
    }
}
