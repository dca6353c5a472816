//! Expand command implementation
//!
//! Asks the server to materialize a value set's code list (`$expand`) and
//! prints the contained codes. Nothing is added to the bundle.

use console::Style;

use std::path::Path;

use serde_json::Value;

use termbundle::client::TerminologyClient;
use termbundle::error::Result;

use crate::cli::ExpandArgs;

use super::connect;

/// Run expand command
pub async fn run(connections_path: &Path, args: ExpandArgs) -> Result<()> {
    let client = connect(connections_path, &args.from)?;
    let value_set = client.expand(&args.id).await?;

    println!(
        "Expansion of {}:",
        Style::new().bold().yellow().apply_to(value_set.label())
    );
    println!();

    let contains = value_set
        .expansion
        .as_ref()
        .and_then(|e| e.get("contains"))
        .and_then(Value::as_array);

    let Some(contains) = contains else {
        println!("  (no codes in expansion)");
        return Ok(());
    };

    for entry in contains {
        let field = |key: &str| entry.get(key).and_then(Value::as_str).unwrap_or("");
        println!(
            "  {:<20} {:<40} {}",
            field("code"),
            field("display"),
            field("system")
        );
    }

    println!();
    println!("{} codes", contains.len());

    Ok(())
}
