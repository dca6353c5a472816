//! Canonical terminology resource models (FHIR R4 ValueSet and CodeSystem)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::identity::ResourceKey;

/// A system + value identifier pair, the alternate identity of a resource
/// (e.g. an OID under `urn:ietf:rfc:3986`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A concept listed inside a compose rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Concept {
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One include (or exclude) rule of a value set composition
///
/// `system` references a code system by canonical URL; `valueSet` references
/// other value sets. Both are the edges of the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IncludeRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concept: Vec<Concept>,

    #[serde(
        rename = "valueSet",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub value_set: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The content definition of a value set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Compose {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<IncludeRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<IncludeRule>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A FHIR R4 ValueSet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValueSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose: Option<Compose>,

    /// Materialized code list from a `$expand` call; opaque to the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A FHIR R4 CodeSystem; terminal node in the dependency graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodeSystem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Code definitions; opaque to the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Either kind of canonical terminology resource, discriminated by the
/// document's `resourceType` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    ValueSet(ValueSet),
    CodeSystem(CodeSystem),
}

impl ValueSet {
    /// Canonical identity key, if the value set has any identity fields
    pub fn key(&self) -> Option<ResourceKey> {
        ResourceKey::derive(self.url.as_deref(), &self.identifier, self.id.as_deref())
    }

    /// Human-readable label for outcome reporting
    pub fn label(&self) -> String {
        label_of(self.name.as_deref(), self.url.as_deref(), self.id.as_deref())
    }
}

impl CodeSystem {
    /// Canonical identity key, if the code system has any identity fields
    pub fn key(&self) -> Option<ResourceKey> {
        ResourceKey::derive(self.url.as_deref(), &self.identifier, self.id.as_deref())
    }

    /// Human-readable label for outcome reporting
    pub fn label(&self) -> String {
        label_of(self.name.as_deref(), self.url.as_deref(), self.id.as_deref())
    }
}

impl Resource {
    /// The `resourceType` discriminant as it appears on the wire
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::ValueSet(_) => "ValueSet",
            Resource::CodeSystem(_) => "CodeSystem",
        }
    }

    /// Canonical identity key, if the resource has any identity fields
    pub fn key(&self) -> Option<ResourceKey> {
        match self {
            Resource::ValueSet(vs) => vs.key(),
            Resource::CodeSystem(cs) => cs.key(),
        }
    }

    /// Human-readable label for outcome reporting
    pub fn label(&self) -> String {
        match self {
            Resource::ValueSet(vs) => vs.label(),
            Resource::CodeSystem(cs) => cs.label(),
        }
    }
}

fn label_of(name: Option<&str>, url: Option<&str>, id: Option<&str>) -> String {
    name.or(url)
        .or(id)
        .unwrap_or("(anonymous)")
        .to_string()
}
