//! storymap - a Google News sitemap server for web stories.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod generator;
mod lifecycle;
mod logger;
mod router;
mod store;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Generate { output } => cli::generate::run_generate(output.as_deref(), &config),
        Commands::Activate => lifecycle::activate(&config),
        Commands::Deactivate => lifecycle::deactivate(&config),
    }
}
