//! mdgen - Markdown document builder
//!
//! A CLI for assembling Markdown documents from scripts and data files.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::fn_params_excessive_bools)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AlignArg, Cli, Commands};
use mdgen::{Alignment, MarkdownBuilder, Options, Script, TableSource, WriteMode};
use std::path::{Path, PathBuf};

/// Main entry point for the mdgen CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            script,
            output,
            config,
            no_toc,
            immediate,
            verbose,
        } => {
            init_logging(verbose);
            handle_build_command(&script, output, config, no_toc, immediate)?;
        }

        Commands::Table {
            input,
            output,
            align,
            capitalize,
            raw,
            verbose,
        } => {
            init_logging(verbose);
            handle_table_command(&input, output, align, capitalize, raw)?;
        }

        Commands::InitConfig { path, force } => {
            handle_init_config_command(&path, force)?;
        }
    }

    Ok(())
}

/// Initialize logging, raised to info level when verbose
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Handle the build command
fn handle_build_command(
    script_path: &Path,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    no_toc: bool,
    immediate: bool,
) -> Result<()> {
    let mut options = match config {
        Some(ref path) => Options::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => Options::default(),
    };
    if output.is_some() {
        options.destination = output;
    }
    if no_toc {
        options.enable_toc = false;
    }
    if immediate {
        options.write_mode = WriteMode::Immediate;
    }

    let script = Script::load(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let base_dir = script_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let (destination, _) = options.destination_path();
    log::info!(
        "Building {} blocks from {} into {}",
        script.blocks.len(),
        script_path.display(),
        destination.display()
    );

    mdgen::write_document(options, |md| script.apply(md, &base_dir))
        .with_context(|| format!("Failed to build {}", destination.display()))?;

    println!("✓ Wrote {}", destination.display());
    Ok(())
}

/// Handle the table command
fn handle_table_command(
    input: &Path,
    output: Option<PathBuf>,
    align: AlignArg,
    capitalize: bool,
    raw: bool,
) -> Result<()> {
    let source = TableSource::load(input)
        .with_context(|| format!("Failed to load table data from {}", input.display()))?;

    let alignment = match align {
        AlignArg::Left => Alignment::Left,
        AlignArg::Center => Alignment::Center,
        AlignArg::Right => Alignment::Right,
    };

    let mut md = MarkdownBuilder::new(Options {
        enable_toc: false,
        ..Options::default()
    });
    md.add_table(
        source
            .into_request()
            .align(alignment)
            .capitalize_headers(capitalize)
            .html_escape(!raw),
    )?;
    let text = md.finish()?;

    match output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Handle the init-config command
fn handle_init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    Options::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Created {}", path.display());
    Ok(())
}
