//! tola-page - Markdown pages with an "On This Page" outline.

#![allow(dead_code)]

mod cli;
mod compiler;
mod config;
mod core;
mod dom;
mod embed;
mod logger;
mod outline;
mod page;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config, false),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
        Commands::Render { slug, file } => cli::render::render_page(&config, slug, file.as_deref()),
        Commands::Outline { slug, pretty } => cli::render::print_outline(&config, slug, *pretty),
    }
}
