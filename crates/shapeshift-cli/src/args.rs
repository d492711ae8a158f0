//! Command-line argument definitions for the Shapeshift CLI.
//!
//! The document comes from the positional `text` argument, from a file given
//! with `--file`, or, when neither is present, from a built-in sample.

use clap::Parser;

/// Command-line arguments for the Shapeshift tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Shapes text to parse, e.g. "[12](BALL(INK))"
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the document from a file instead, streaming it through the parser
    #[arg(short, long)]
    pub file: Option<String>,

    /// Path to write an SVG rendering of the parsed tree
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
