//! Command-line interface definitions for mdgen

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Column alignment accepted by the table command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum AlignArg {
    /// Left-aligned columns
    Left,
    /// Centered columns
    #[default]
    Center,
    /// Right-aligned columns
    Right,
}

/// CLI structure for the mdgen application
#[derive(Parser)]
#[command(name = "mdgen")]
#[command(version)]
#[command(about = "Markdown document builder", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for mdgen
#[derive(Subcommand)]
pub enum Commands {
    /// Build a Markdown document from a TOML or JSON script
    Build {
        /// Document script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output file (overrides the options file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip table of contents generation
        #[arg(long)]
        no_toc: bool,

        /// Write each fragment as soon as it is emitted
        #[arg(long)]
        immediate: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a CSV or JSON data file as a Markdown table
    Table {
        /// CSV file (first line holds the headers) or JSON array of objects
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column alignment
        #[arg(short, long, value_enum, default_value = "center")]
        align: AlignArg,

        /// Capitalize header names
        #[arg(long)]
        capitalize: bool,

        /// Do not HTML-escape cell values
        #[arg(long)]
        raw: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the default options to a TOML file
    InitConfig {
        /// Options file to create
        #[arg(default_value = "mdgen.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
