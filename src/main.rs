//! termbundle - FHIR terminology bundle assembler
//!
//! A command line tool for assembling FHIR R4 ValueSet and CodeSystem
//! resources from local files and remote terminology servers into a
//! portable, deduplicated collection bundle.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod progress;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "termbundle=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let bundle_path = cli.bundle.as_path();
    let connections_path = cli.connections.as_path();

    let result = match cli.command {
        Commands::Ingest(args) => commands::ingest::run(bundle_path, connections_path, args).await,
        Commands::List => commands::list::run(bundle_path),
        Commands::Remove(args) => commands::remove::run(bundle_path, args),
        Commands::Search(args) => commands::search::run(connections_path, args).await,
        Commands::Add(args) => commands::add::run(bundle_path, connections_path, args).await,
        Commands::Expand(args) => commands::expand::run(connections_path, args).await,
        Commands::Export(args) => commands::export::run(bundle_path, args),
        Commands::Submit(args) => commands::submit::run(bundle_path, connections_path, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
