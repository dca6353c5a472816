//! The bundle mutator: the single idempotent entry point for growing and
//! shrinking a terminology bundle
//!
//! All additions go through here so the bundle invariant (one entry per
//! identity and type) holds no matter which adapter or server produced the
//! resource. The engine is stateless between calls; every operation takes a
//! bundle and returns a new one.

use tracing::debug;

use crate::client::TerminologyClient;
use crate::error::{Result, TermError};
use crate::fhir::{Bundle, CodeSystem, Resource, ValueSet};
use crate::resolver;

/// Result of one add operation
#[derive(Debug)]
pub struct AddOutcome {
    /// The bundle after the mutation
    pub bundle: Bundle,

    /// Labels of the resources actually appended (empty for a no-op)
    pub added: Vec<String>,

    /// Set when the value set itself was appended but its dependency
    /// resolution failed; the caller decides how to surface it
    pub dependency_failure: Option<TermError>,
}

impl AddOutcome {
    fn unchanged(bundle: Bundle) -> Self {
        Self {
            bundle,
            added: Vec::new(),
            dependency_failure: None,
        }
    }
}

/// Add a value set to the bundle, pulling in its missing dependencies when a
/// source connection is available
///
/// Idempotent: a value set whose identity is already present is a no-op.
/// With a `source`, dependencies are resolved against the pre-append bundle
/// state and each resolved resource is individually re-checked before its
/// append, which guards against resources discovered twice in one batch.
/// Without a `source` (manual upload), no dependencies are fetched.
pub async fn add_value_set(
    bundle: &Bundle,
    value_set: ValueSet,
    source: Option<&dyn TerminologyClient>,
) -> Result<AddOutcome> {
    if bundle.contains_value_set(&value_set) {
        debug!(value_set = %value_set.label(), "already in bundle");
        return Ok(AddOutcome::unchanged(bundle.clone()));
    }

    let label = value_set.label();

    let Some(client) = source else {
        let next = bundle.with_entry(Resource::ValueSet(value_set))?;
        return Ok(AddOutcome {
            bundle: next,
            added: vec![label],
            dependency_failure: None,
        });
    };

    // Resolve against the pre-append state, then append the value set
    let resolution = resolver::resolve_dependencies(client, bundle, &value_set).await;
    let mut next = bundle.with_entry(Resource::ValueSet(value_set))?;
    let mut added = vec![label];

    match resolution {
        Ok(dependencies) => {
            for dependency in dependencies {
                if next.contains_resource(&dependency) {
                    continue;
                }
                added.push(dependency.label());
                next = next.with_entry(dependency)?;
            }
            Ok(AddOutcome {
                bundle: next,
                added,
                dependency_failure: None,
            })
        }
        Err(err) => Ok(AddOutcome {
            bundle: next,
            added,
            dependency_failure: Some(err),
        }),
    }
}

/// Add a code system to the bundle
///
/// Code systems are terminal nodes in the dependency graph and never trigger
/// further resolution.
pub fn add_code_system(bundle: &Bundle, code_system: CodeSystem) -> Result<AddOutcome> {
    if bundle.contains_code_system(&code_system) {
        debug!(code_system = %code_system.label(), "already in bundle");
        return Ok(AddOutcome::unchanged(bundle.clone()));
    }

    let label = code_system.label();
    let next = bundle.with_entry(Resource::CodeSystem(code_system))?;
    Ok(AddOutcome {
        bundle: next,
        added: vec![label],
        dependency_failure: None,
    })
}

/// Remove the entry at a positional index
pub fn remove(bundle: &Bundle, index: usize) -> Result<Bundle> {
    bundle.without_entry(index)
}
