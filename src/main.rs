//! Statue - content ingestion for a markdown static site generator.

mod build;
mod cli;
mod config;
mod content;
mod inspect;
mod logger;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{ContentStore, DirectoryScanner};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config = SiteConfig::load(cli)?;

    let scanner = DirectoryScanner::new(&config.build.content, &config);
    let store = ContentStore::new(scanner, config.cache_mode());

    match &cli.command {
        Commands::List { dir, length } => inspect::list(&store, dir.as_deref(), *length),
        Commands::Show { url, json } => inspect::show(&store, url, *json),
        Commands::Dirs { dir } => inspect::dirs(&store, dir.as_deref()),
        Commands::Vars => {
            inspect::vars(&store);
            Ok(())
        }
        Commands::Build { .. } => {
            log!("build"; "content root `{}` ({:?} mode)", store.source().root().display(), store.mode());
            build_site(&config, &store).map(|_| ())
        }
    }
}
