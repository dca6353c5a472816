//! List command implementation
//!
//! Lists bundle entries with their index, resource type, label, version,
//! and publisher. The index is the handle `remove` takes.

use console::Style;

use std::path::Path;

use termbundle::error::Result;
use termbundle::fhir::Resource;

use super::load_or_new_bundle;

/// Run list command
pub fn run(bundle_path: &Path) -> Result<()> {
    let bundle = load_or_new_bundle(bundle_path)?;

    if bundle.is_empty() {
        println!("Bundle is empty.");
        return Ok(());
    }

    println!("Bundle entries ({}):", bundle.len());
    println!();

    for (index, resource) in bundle.resources().enumerate() {
        display_entry(index, resource);
    }

    Ok(())
}

fn display_entry(index: usize, resource: &Resource) {
    let (version, publisher) = match resource {
        Resource::ValueSet(vs) => (vs.version.as_deref(), vs.publisher.as_deref()),
        Resource::CodeSystem(cs) => (cs.version.as_deref(), cs.publisher.as_deref()),
    };

    println!(
        "  [{index}] {:<10} {}",
        resource.resource_type(),
        Style::new().bold().yellow().apply_to(resource.label())
    );
    if let Some(version) = version {
        println!("        {} {version}", Style::new().bold().apply_to("Version:"));
    }
    if let Some(publisher) = publisher {
        println!(
            "        {} {publisher}",
            Style::new().bold().apply_to("Publisher:")
        );
    }
}
