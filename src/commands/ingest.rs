//! Ingest command implementation
//!
//! Reads a batch of local files, folds them into the bundle, reports one
//! outcome per file, and writes the bundle back. A failed file never stops
//! the rest of the batch; the command only exits non-zero for problems
//! outside the batch itself (unreadable connections file, unwritable
//! bundle).

use console::Style;

use std::path::Path;

use termbundle::client::TerminologyClient;
use termbundle::error::Result;
use termbundle::ingest::{self, InputArtifact, OutcomeStatus};

use crate::cli::IngestArgs;
use crate::progress::IngestProgress;

use super::{connect, load_or_new_bundle};

/// Run ingest command
pub async fn run(bundle_path: &Path, connections_path: &Path, args: IngestArgs) -> Result<()> {
    let bundle = load_or_new_bundle(bundle_path)?;

    let client = match args.from.as_deref() {
        Some(name) => Some(connect(connections_path, name)?),
        None => None,
    };
    let source = client.as_ref().map(|c| c as &dyn TerminologyClient);

    let progress = IngestProgress::new(args.files.len() as u64);
    let mut artifacts = Vec::with_capacity(args.files.len());
    for file in &args.files {
        progress.advance(&file.display().to_string());
        artifacts.push(InputArtifact::from_path(file)?);
    }
    progress.finish();

    let report = ingest::ingest(artifacts, bundle, source).await;

    for outcome in &report.outcomes {
        match outcome.status {
            OutcomeStatus::Fulfilled => {
                println!(
                    "{} {}",
                    Style::new().green().apply_to("✓"),
                    Style::new().bold().apply_to(&outcome.source)
                );
            }
            OutcomeStatus::Rejected => {
                println!(
                    "{} {}: {}",
                    Style::new().red().apply_to("✗"),
                    Style::new().bold().apply_to(&outcome.source),
                    outcome.error.as_deref().unwrap_or("rejected")
                );
            }
        }
        for label in &outcome.added {
            println!("    added {label}");
        }
    }

    report.bundle.save(bundle_path)?;

    println!();
    println!(
        "Bundle has {} entries ({} of {} files ingested cleanly)",
        report.bundle.len(),
        report.outcomes.len() - report.rejected_count(),
        report.outcomes.len()
    );

    Ok(())
}
