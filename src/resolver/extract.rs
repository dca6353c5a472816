//! Dependency reference extraction from value set composition rules

use std::collections::HashSet;

use crate::client::ResourceKind;
use crate::fhir::ValueSet;

/// A discriminated pointer extracted from a value set's composition:
/// either another value set or a code system, by canonical URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyRef {
    ValueSet { url: String },
    CodeSystem { url: String },
}

impl DependencyRef {
    pub fn url(&self) -> &str {
        match self {
            DependencyRef::ValueSet { url } | DependencyRef::CodeSystem { url } => url,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            DependencyRef::ValueSet { .. } => ResourceKind::ValueSet,
            DependencyRef::CodeSystem { .. } => ResourceKind::CodeSystem,
        }
    }
}

/// Extract every distinct resource reference from the value set's compose
/// rules, in discovery order
///
/// `include[].system` references a code system, `include[].valueSet[]`
/// references other value sets. The classification happens here, once; the
/// rest of the engine matches on the tagged union.
pub fn extract_dependencies(value_set: &ValueSet) -> Vec<DependencyRef> {
    let mut refs = Vec::new();
    let mut seen = HashSet::new();

    let Some(compose) = &value_set.compose else {
        return refs;
    };

    for rule in &compose.include {
        if let Some(system) = rule.system.as_deref().filter(|s| !s.is_empty()) {
            let reference = DependencyRef::CodeSystem {
                url: system.to_string(),
            };
            if seen.insert(reference.clone()) {
                refs.push(reference);
            }
        }

        for url in &rule.value_set {
            if url.is_empty() {
                continue;
            }
            let reference = DependencyRef::ValueSet { url: url.clone() };
            if seen.insert(reference.clone()) {
                refs.push(reference);
            }
        }
    }

    refs
}
