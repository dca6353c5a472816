//! Submit command implementation

use console::Style;

use std::path::Path;

use termbundle::error::Result;
use termbundle::fhir::Bundle;
use termbundle::submit::submit_bundle;

use crate::cli::SubmitArgs;

use super::connect;

/// Run submit command
pub async fn run(bundle_path: &Path, connections_path: &Path, args: SubmitArgs) -> Result<()> {
    let bundle = Bundle::load(bundle_path)?;

    if bundle.is_empty() {
        println!("Bundle is empty; nothing to submit.");
        return Ok(());
    }

    let client = connect(connections_path, &args.to)?;
    let report = submit_bundle(&client, &bundle).await?;

    if report.is_clean() {
        println!(
            "{} Submitted {} entries to '{}'.",
            Style::new().green().apply_to("✓"),
            bundle.len(),
            args.to
        );
        return Ok(());
    }

    println!(
        "Submitted {} entries to '{}'; the server reported {} issues:",
        bundle.len(),
        args.to,
        report.issues.len()
    );
    println!();
    for issue in &report.issues {
        println!("  {} {issue}", Style::new().yellow().apply_to("!"));
    }
    println!();
    println!("In most cases this just means the code systems or value sets already exist.");

    Ok(())
}
