//! Search command implementation

use console::Style;

use std::path::Path;

use termbundle::client::{SearchParams, TerminologyClient};
use termbundle::error::Result;

use crate::cli::SearchArgs;

use super::connect;

/// Run search command
pub async fn run(connections_path: &Path, args: SearchArgs) -> Result<()> {
    let client = connect(connections_path, &args.from)?;

    let params = SearchParams {
        url: args.url,
        name: args.name,
        identifier: args.identifier,
    };

    let results = client.search_value_sets(&params).await?;

    if results.is_empty() {
        println!("No value sets found.");
        return Ok(());
    }

    println!("Found {} value sets:", results.len());
    println!();

    for value_set in &results {
        println!(
            "  {}",
            Style::new().bold().yellow().apply_to(value_set.label())
        );
        if let Some(id) = value_set.id.as_deref() {
            println!("    {} {id}", Style::new().bold().apply_to("Id:"));
        }
        if let Some(url) = value_set.url.as_deref() {
            println!("    {} {url}", Style::new().bold().apply_to("Url:"));
        }
        if let Some(version) = value_set.version.as_deref() {
            println!("    {} {version}", Style::new().bold().apply_to("Version:"));
        }
        if let Some(publisher) = value_set.publisher.as_deref() {
            println!(
                "    {} {publisher}",
                Style::new().bold().apply_to("Publisher:")
            );
        }
        println!();
    }

    Ok(())
}
