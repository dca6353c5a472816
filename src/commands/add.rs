//! Add command implementation
//!
//! Fetches a value set by id from a connection and folds it into the bundle
//! together with its one-hop dependencies. A dependency that cannot be
//! resolved leaves the value set in the bundle and is reported as a warning.

use console::Style;

use std::path::Path;

use termbundle::assembler;
use termbundle::client::TerminologyClient;
use termbundle::error::Result;

use crate::cli::AddArgs;

use super::{connect, load_or_new_bundle};

/// Run add command
pub async fn run(bundle_path: &Path, connections_path: &Path, args: AddArgs) -> Result<()> {
    let bundle = load_or_new_bundle(bundle_path)?;
    let client = connect(connections_path, &args.from)?;

    let value_set = client.fetch_value_set_by_id(&args.id).await?;
    let label = value_set.label();

    let outcome = assembler::add_value_set(&bundle, value_set, Some(&client)).await?;

    if outcome.added.is_empty() {
        println!("'{label}' is already in the bundle.");
        return Ok(());
    }

    outcome.bundle.save(bundle_path)?;

    for added in &outcome.added {
        println!("{} added {added}", Style::new().green().apply_to("✓"));
    }

    if let Some(failure) = outcome.dependency_failure {
        println!(
            "{} dependency resolution incomplete: {failure}",
            Style::new().yellow().apply_to("!")
        );
    }

    println!("Bundle has {} entries", outcome.bundle.len());

    Ok(())
}
