//! The terminology bundle and its identity-based store operations
//!
//! A bundle is an immutable-per-version value: every mutation returns a new
//! bundle and leaves the input untouched, so callers can hold the old and
//! new versions side by side and no locking is ever needed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};

use super::resource::{CodeSystem, Resource, ValueSet};

fn bundle_resource_type() -> String {
    "Bundle".to_string()
}

fn collection_type() -> String {
    "collection".to_string()
}

/// One bundle entry wrapping exactly one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub resource: Resource,
}

/// An ordered collection of terminology resources assembled for portable
/// submission
///
/// Invariant: no two entries hold resources of the same type with the same
/// canonical identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType", default = "bundle_resource_type")]
    pub resource_type: String,

    #[serde(rename = "type", default = "collection_type")]
    pub bundle_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundle {
    /// Create a new empty collection bundle
    pub fn new() -> Self {
        Self {
            resource_type: bundle_resource_type(),
            bundle_type: collection_type(),
            entry: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Iterate over the contained resources in entry order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().map(|e| &e.resource)
    }

    /// True iff an entry holds a value set with the same canonical identity.
    /// Anonymous candidates (no url, identifier, or id) never match.
    pub fn contains_value_set(&self, candidate: &ValueSet) -> bool {
        let Some(key) = candidate.key() else {
            return false;
        };

        self.resources().any(|r| match r {
            Resource::ValueSet(vs) => vs.key() == Some(key.clone()),
            Resource::CodeSystem(_) => false,
        })
    }

    /// True iff an entry holds a code system with the same canonical identity
    pub fn contains_code_system(&self, candidate: &CodeSystem) -> bool {
        let Some(key) = candidate.key() else {
            return false;
        };

        self.resources().any(|r| match r {
            Resource::CodeSystem(cs) => cs.key() == Some(key.clone()),
            Resource::ValueSet(_) => false,
        })
    }

    /// True iff an entry holds a resource of the same type and identity
    pub fn contains_resource(&self, candidate: &Resource) -> bool {
        match candidate {
            Resource::ValueSet(vs) => self.contains_value_set(vs),
            Resource::CodeSystem(cs) => self.contains_code_system(cs),
        }
    }

    /// Append a resource, returning a new bundle
    ///
    /// Fails with `DuplicateEntry` if an entry of the same type and identity
    /// already exists. Callers are expected to pre-check with `contains_*`;
    /// the error guards the bundle invariant against mutator bugs.
    pub fn with_entry(&self, resource: Resource) -> Result<Bundle> {
        if self.contains_resource(&resource) {
            return Err(TermError::DuplicateEntry {
                resource_type: resource.resource_type().to_string(),
                label: resource.label(),
            });
        }

        let mut next = self.clone();
        next.entry.push(BundleEntry { resource });
        Ok(next)
    }

    /// Remove the entry at a positional index, returning a new bundle
    pub fn without_entry(&self, index: usize) -> Result<Bundle> {
        if index >= self.entry.len() {
            return Err(TermError::IndexOutOfRange {
                index,
                len: self.entry.len(),
            });
        }

        let mut next = self.clone();
        next.entry.remove(index);
        Ok(next)
    }

    /// Parse a bundle from its JSON document form
    pub fn from_json(json: &str) -> Result<Bundle> {
        let bundle: Bundle = serde_json::from_str(json)?;
        Ok(bundle)
    }

    /// Serialize to the exported document form, pretty-printed
    pub fn to_json_pretty(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Load a bundle from a file
    pub fn load(path: &Path) -> Result<Bundle> {
        let json = std::fs::read_to_string(path).map_err(|e| TermError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Write the bundle to a file, pretty-printed
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| TermError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
