//! Export command implementation
//!
//! Writes the bundle to a caller-named file. The written document is itself
//! a valid composite input, so exporting and re-ingesting round-trips the
//! entries.

use std::path::Path;

use termbundle::error::Result;
use termbundle::fhir::Bundle;

use crate::cli::ExportArgs;

/// Run export command
pub fn run(bundle_path: &Path, args: ExportArgs) -> Result<()> {
    let bundle = Bundle::load(bundle_path)?;
    bundle.save(&args.output)?;

    println!(
        "Exported {} entries to {}",
        bundle.len(),
        args.output.display()
    );

    Ok(())
}
