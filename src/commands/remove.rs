//! Remove command implementation

use std::path::Path;

use termbundle::assembler;
use termbundle::error::Result;
use termbundle::fhir::Bundle;

use crate::cli::RemoveArgs;

/// Run remove command
pub fn run(bundle_path: &Path, args: RemoveArgs) -> Result<()> {
    let bundle = Bundle::load(bundle_path)?;

    let label = bundle
        .resources()
        .nth(args.index)
        .map(termbundle::fhir::Resource::label);

    let next = assembler::remove(&bundle, args.index)?;
    next.save(bundle_path)?;

    // The index check in remove() guarantees the label exists here
    if let Some(label) = label {
        println!("Removed entry [{}]: {label}", args.index);
    }
    println!("Bundle has {} entries", next.len());

    Ok(())
}
