//! JSON document adapters: single resource and composite bundle
//!
//! A document whose top-level `resourceType` is `ValueSet` or `CodeSystem`
//! yields one resource; a `Bundle` yields one resource per entry holding
//! either kind, with other entry kinds silently skipped. Anything else is
//! `UnrecognizedResourceType`.

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TermError};
use crate::fhir::Resource;

/// Parse a JSON artifact into zero or more canonical resources
pub fn parse_document(data: &[u8]) -> Result<Vec<Resource>> {
    let document: Value = serde_json::from_slice(data)?;

    let resource_type = document
        .get("resourceType")
        .and_then(Value::as_str)
        .unwrap_or("(missing)")
        .to_string();

    match resource_type.as_str() {
        "ValueSet" | "CodeSystem" => {
            let resource: Resource = serde_json::from_value(document)?;
            Ok(vec![resource])
        }
        "Bundle" => parse_composite(&document),
        _ => Err(TermError::UnrecognizedResourceType { resource_type }),
    }
}

/// One resource per bundle entry holding a value set or code system; an
/// empty or absent entry list yields zero resources, not an error
fn parse_composite(document: &Value) -> Result<Vec<Resource>> {
    let entries = match document.get("entry") {
        Some(Value::Array(entries)) => entries,
        _ => return Ok(Vec::new()),
    };

    let mut resources = Vec::new();
    for entry in entries {
        let Some(nested) = entry.get("resource") else {
            continue;
        };

        match nested.get("resourceType").and_then(Value::as_str) {
            Some("ValueSet") | Some("CodeSystem") => {
                let resource: Resource = serde_json::from_value(nested.clone())?;
                resources.push(resource);
            }
            other => {
                debug!(resource_type = other.unwrap_or("(missing)"), "skipping bundle entry");
            }
        }
    }

    Ok(resources)
}
