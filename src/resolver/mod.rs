//! Network-backed dependency resolution for value sets
//!
//! Given a value set and the connection it came from, discover every
//! resource its composition references and fetch the ones the bundle does
//! not already hold. Resolution is one hop deep per call: value sets added
//! through the same flow re-enter it, so repeated adds converge on the
//! closure without an unbounded network walk.

pub mod extract;

pub use extract::{DependencyRef, extract_dependencies};

use futures::future::try_join_all;
use tracing::debug;

use crate::client::{FetchedResource, TerminologyClient};
use crate::error::{Result, TermError};
use crate::fhir::{Bundle, Resource, ValueSet};

/// Resolve the still-missing dependencies of `value_set`, in discovery order
///
/// Presence is checked against `bundle` as it exists at call start. Any
/// fetch failure fails the whole call so a partial dependency set is never
/// silently applied; a fetched resource that is neither a value set nor a
/// code system is a fatal `UnknownDependencyType` for this call.
pub async fn resolve_dependencies(
    client: &dyn TerminologyClient,
    bundle: &Bundle,
    value_set: &ValueSet,
) -> Result<Vec<Resource>> {
    let refs = extract_dependencies(value_set);
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        value_set = %value_set.label(),
        count = refs.len(),
        "resolving dependencies"
    );

    // One round trip per distinct reference, in flight together
    let fetches = refs
        .iter()
        .map(|reference| client.fetch_by_url(reference.kind(), reference.url()));
    let fetched = try_join_all(fetches).await?;

    let mut missing = Vec::new();
    for (reference, resource) in refs.iter().zip(fetched) {
        match resource {
            FetchedResource::ValueSet(vs) => {
                if !bundle.contains_value_set(&vs) {
                    missing.push(Resource::ValueSet(vs));
                }
            }
            FetchedResource::CodeSystem(cs) => {
                if !bundle.contains_code_system(&cs) {
                    missing.push(Resource::CodeSystem(cs));
                }
            }
            FetchedResource::Other { resource_type } => {
                debug!(url = reference.url(), %resource_type, "unknown dependency kind");
                return Err(TermError::UnknownDependencyType { resource_type });
            }
        }
    }

    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        MockClient, code_system, value_set, value_set_with_refs,
    };

    #[tokio::test]
    async fn test_resolves_missing_dependencies_in_order() {
        let vs = value_set_with_refs(
            "vs-1",
            "http://example.org/vs-1",
            &["http://snomed.info/sct"],
            &["http://example.org/vs-x", "http://example.org/vs-y"],
        );

        let client = MockClient::new()
            .with_code_system(code_system("sct", "http://snomed.info/sct"))
            .with_value_set(value_set("vs-x", "http://example.org/vs-x"))
            .with_value_set(value_set("vs-y", "http://example.org/vs-y"));

        let resolved = resolve_dependencies(&client, &Bundle::new(), &vs)
            .await
            .unwrap();

        let labels: Vec<String> = resolved.iter().map(Resource::label).collect();
        assert_eq!(labels, vec!["sct", "vs-x", "vs-y"]);
    }

    #[tokio::test]
    async fn test_already_present_dependencies_dropped() {
        let vs = value_set_with_refs(
            "vs-1",
            "http://example.org/vs-1",
            &["http://snomed.info/sct"],
            &["http://example.org/vs-x"],
        );

        let bundle = Bundle::new()
            .with_entry(Resource::CodeSystem(code_system(
                "sct",
                "http://snomed.info/sct",
            )))
            .unwrap();

        let client = MockClient::new()
            .with_code_system(code_system("sct", "http://snomed.info/sct"))
            .with_value_set(value_set("vs-x", "http://example.org/vs-x"));

        let resolved = resolve_dependencies(&client, &bundle, &vs).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].label(), "vs-x");
    }

    #[tokio::test]
    async fn test_unknown_dependency_type_is_fatal() {
        let vs = value_set_with_refs(
            "vs-1",
            "http://example.org/vs-1",
            &[],
            &["http://example.org/not-a-vs"],
        );

        let client = MockClient::new().with_other("http://example.org/not-a-vs", "ConceptMap");

        let err = resolve_dependencies(&client, &Bundle::new(), &vs)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TermError::UnknownDependencyType { resource_type } if resource_type == "ConceptMap"
        ));
    }

    #[tokio::test]
    async fn test_network_failure_fails_whole_call() {
        let vs = value_set_with_refs(
            "vs-1",
            "http://example.org/vs-1",
            &["http://snomed.info/sct"],
            &["http://example.org/vs-x"],
        );

        // First reference resolves, second fails; no partial set comes back
        let client = MockClient::new()
            .with_code_system(code_system("sct", "http://snomed.info/sct"))
            .with_failure("http://example.org/vs-x");

        let err = resolve_dependencies(&client, &Bundle::new(), &vs)
            .await
            .unwrap_err();
        assert!(matches!(err, TermError::NetworkFailure { .. }));
    }

    #[tokio::test]
    async fn test_no_compose_resolves_to_nothing() {
        let vs = value_set("vs-1", "http://example.org/vs-1");
        let client = MockClient::new();

        let resolved = resolve_dependencies(&client, &Bundle::new(), &vs)
            .await
            .unwrap();
        assert!(resolved.is_empty());
    }
}
