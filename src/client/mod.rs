//! Abstract FHIR terminology server capabilities
//!
//! The engine consumes a terminology server through [`TerminologyClient`];
//! the bundled [`RestClient`] speaks FHIR R4 REST, and tests substitute an
//! in-memory double. Cancellation and timeouts are the transport's concern
//! and surface here as ordinary `NetworkFailure` errors.

pub mod rest;

pub use rest::RestClient;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::fhir::{Bundle, CodeSystem, ValueSet};

/// Which kind of canonical resource a fetch is after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ValueSet,
    CodeSystem,
}

impl ResourceKind {
    /// REST path segment / `resourceType` value
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::ValueSet => "ValueSet",
            ResourceKind::CodeSystem => "CodeSystem",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search parameters for value set lookup
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Canonical URL
    pub url: Option<String>,
    /// Value set name (server-side partial match)
    pub name: Option<String>,
    /// Identifier value, e.g. an OID
    pub identifier: Option<String>,
}

impl SearchParams {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.name.is_none() && self.identifier.is_none()
    }
}

/// A document fetched from a server, classified once by its `resourceType`
///
/// `Other` carries whatever the server actually returned; resolving a value
/// set dependency to it is an `UnknownDependencyType` error.
#[derive(Debug, Clone)]
pub enum FetchedResource {
    ValueSet(ValueSet),
    CodeSystem(CodeSystem),
    Other { resource_type: String },
}

impl FetchedResource {
    /// Classify a raw JSON document by its `resourceType` field
    pub fn classify(document: Value) -> Result<FetchedResource> {
        let resource_type = document
            .get("resourceType")
            .and_then(Value::as_str)
            .unwrap_or("(missing)")
            .to_string();

        match resource_type.as_str() {
            "ValueSet" => Ok(FetchedResource::ValueSet(serde_json::from_value(document)?)),
            "CodeSystem" => Ok(FetchedResource::CodeSystem(serde_json::from_value(
                document,
            )?)),
            _ => Ok(FetchedResource::Other { resource_type }),
        }
    }
}

/// Per-entry response information from a bundle submission
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponseBundle {
    #[serde(default)]
    pub entry: Vec<ResponseEntry>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponseEntry {
    #[serde(default)]
    pub response: Option<EntryResponse>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EntryResponse {
    #[serde(default)]
    pub status: Option<String>,

    /// OperationOutcome for this entry, when the server reported one
    #[serde(default)]
    pub outcome: Option<OperationOutcome>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OperationOutcome {
    #[serde(default)]
    pub issue: Vec<OutcomeIssue>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutcomeIssue {
    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub diagnostics: Option<String>,
}

impl ResponseBundle {
    /// Collect human-readable messages for every non-informational issue the
    /// server reported, in entry order
    pub fn issue_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();

        for entry in &self.entry {
            let Some(response) = &entry.response else {
                continue;
            };
            let Some(outcome) = &response.outcome else {
                continue;
            };

            for issue in &outcome.issue {
                if matches!(issue.severity.as_deref(), Some("information")) {
                    continue;
                }

                let message = issue
                    .diagnostics
                    .clone()
                    .or_else(|| issue.code.clone())
                    .or_else(|| response.status.clone())
                    .unwrap_or_else(|| "unspecified issue".to_string());
                messages.push(message);
            }
        }

        messages
    }
}

/// Capabilities of a remote terminology server, as consumed by the engine
#[async_trait]
pub trait TerminologyClient: Send + Sync {
    /// Fetch a value set by its server-assigned id
    async fn fetch_value_set_by_id(&self, id: &str) -> Result<ValueSet>;

    /// Fetch a resource by canonical URL, classified by what came back
    async fn fetch_by_url(&self, kind: ResourceKind, url: &str) -> Result<FetchedResource>;

    /// Search value sets by canonical URL, name and/or identifier
    async fn search_value_sets(&self, params: &SearchParams) -> Result<Vec<ValueSet>>;

    /// Materialize the code list of a value set (`$expand`)
    async fn expand(&self, value_set_id: &str) -> Result<ValueSet>;

    /// Submit the bundle as a transaction, returning per-entry outcomes
    async fn submit(&self, bundle: &Bundle) -> Result<ResponseBundle>;
}
